//! In-memory identity collaborators for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use hearth_storage::UserId;

use crate::{DeviceDirectory, IdentityError, IdentityProvider, IssuedCredential, Login};

/// Deterministic token minter. Tokens embed the first claim and the ttl so
/// tests can assert on what was requested.
#[derive(Default)]
pub struct MemoryIdentityProvider {
    unavailable: Mutex<Option<String>>,
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent exchange fail with `Unavailable(reason)`.
    pub fn set_unavailable(&self, reason: impl Into<String>) {
        let mut unavailable = self.unavailable.lock().unwrap();
        *unavailable = Some(reason.into());
    }
}

#[async_trait::async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn exchange_for_token(
        &self,
        logins: &[Login],
        ttl: Duration,
    ) -> Result<IssuedCredential, IdentityError> {
        if let Some(reason) = self.unavailable.lock().unwrap().clone() {
            return Err(IdentityError::Unavailable(reason));
        }
        let primary = logins
            .first()
            .ok_or_else(|| IdentityError::Unavailable("no login claims".to_string()))?;
        Ok(IssuedCredential {
            token: format!("token:{}:{}", primary.claim, ttl.as_secs()),
            identity_id: format!("identity:{}", primary.claim),
        })
    }
}

/// Fingerprint map keyed by user.
#[derive(Default)]
pub struct MemoryDeviceDirectory {
    fingerprints: Mutex<HashMap<UserId, Vec<String>>>,
}

impl MemoryDeviceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_fingerprint(&self, user_id: &UserId, fingerprint: impl Into<String>) {
        let mut fingerprints = self.fingerprints.lock().unwrap();
        fingerprints
            .entry(user_id.clone())
            .or_default()
            .push(fingerprint.into());
    }
}

#[async_trait::async_trait]
impl DeviceDirectory for MemoryDeviceDirectory {
    async fn device_fingerprints(&self, user_id: &UserId) -> Result<Vec<String>, IdentityError> {
        let fingerprints = self.fingerprints.lock().unwrap();
        Ok(fingerprints.get(user_id).cloned().unwrap_or_default())
    }
}
