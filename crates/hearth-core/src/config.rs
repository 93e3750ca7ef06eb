//! Service configuration.

use std::time::Duration;

use thiserror::Error;

const DEFAULT_MATCH_THRESHOLD: f32 = 95.0;
const DEFAULT_MAX_CANDIDATES: usize = 5;
const DEFAULT_MIN_ENROLLED_FACES: usize = 3;
const DEFAULT_TOKEN_TTL_SECS: u64 = 86_400;
const DEFAULT_DEVELOPER_PROVIDER: &str = "login.hearth.dev";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Tunables for face resolution and credential issuance.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// Minimum match confidence, in percent, for a search candidate to count.
    pub match_threshold: f32,
    /// How many ranked candidates to request per search.
    pub max_candidates: usize,
    /// Fewest usable samples an enrollment may commit with.
    pub min_enrolled_faces: usize,
    /// Lifetime of issued credentials.
    pub token_ttl: Duration,
    /// Provider name under which resolved users are claimed.
    pub developer_provider: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            min_enrolled_faces: DEFAULT_MIN_ENROLLED_FACES,
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
            developer_provider: DEFAULT_DEVELOPER_PROVIDER.to_string(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value }),
        Err(_) => Ok(default),
    }
}

impl ServiceConfig {
    /// Build from `HEARTH_*` environment variables, falling back to the
    /// defaults above for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            match_threshold: parse_env("HEARTH_MATCH_THRESHOLD", defaults.match_threshold)?,
            max_candidates: parse_env("HEARTH_MAX_CANDIDATES", defaults.max_candidates)?,
            min_enrolled_faces: parse_env(
                "HEARTH_MIN_ENROLLED_FACES",
                defaults.min_enrolled_faces,
            )?,
            token_ttl: Duration::from_secs(parse_env(
                "HEARTH_TOKEN_TTL_SECS",
                DEFAULT_TOKEN_TTL_SECS,
            )?),
            developer_provider: parse_env(
                "HEARTH_DEVELOPER_PROVIDER",
                defaults.developer_provider,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment variables are process-global; serialize the tests that
    // touch them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct EnvGuard {
        vars: Vec<&'static str>,
    }

    impl EnvGuard {
        fn set(vars: &[(&'static str, &str)]) -> Self {
            for (var, value) in vars {
                std::env::set_var(var, value);
            }
            Self {
                vars: vars.iter().map(|(var, _)| *var).collect(),
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn defaults_without_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        let config = ServiceConfig::from_env().unwrap();
        assert_eq!(config.match_threshold, 95.0);
        assert_eq!(config.max_candidates, 5);
        assert_eq!(config.min_enrolled_faces, 3);
        assert_eq!(config.token_ttl, Duration::from_secs(86_400));
        assert_eq!(config.developer_provider, "login.hearth.dev");
    }

    #[test]
    fn env_overrides_apply() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _guard = EnvGuard::set(&[
            ("HEARTH_MATCH_THRESHOLD", "90.5"),
            ("HEARTH_MAX_CANDIDATES", "10"),
            ("HEARTH_MIN_ENROLLED_FACES", "1"),
            ("HEARTH_TOKEN_TTL_SECS", "3600"),
            ("HEARTH_DEVELOPER_PROVIDER", "login.example.test"),
        ]);

        let config = ServiceConfig::from_env().unwrap();
        assert_eq!(config.match_threshold, 90.5);
        assert_eq!(config.max_candidates, 10);
        assert_eq!(config.min_enrolled_faces, 1);
        assert_eq!(config.token_ttl, Duration::from_secs(3600));
        assert_eq!(config.developer_provider, "login.example.test");
    }

    #[test]
    fn invalid_value_is_rejected() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _guard = EnvGuard::set(&[("HEARTH_MAX_CANDIDATES", "many")]);

        let err = ServiceConfig::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                var: "HEARTH_MAX_CANDIDATES",
                ..
            }
        ));
    }
}
