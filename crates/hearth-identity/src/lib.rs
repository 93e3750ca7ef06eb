//! Identity collaborators.
//!
//! Two external seams live here: the federated identity provider that
//! exchanges a resolved user for a short-lived credential, and the device
//! directory that knows which hardware key fingerprints a user's devices
//! carry. Both come with in-memory implementations for tests.

use std::time::Duration;

use thiserror::Error;

use hearth_storage::UserId;

mod memory;

pub use memory::{MemoryDeviceDirectory, MemoryIdentityProvider};

/// One login claim handed to the identity provider. The developer provider
/// claim carries the resolved user; additional provider claims (e.g. an
/// already-linked social login) may ride along.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Login {
    pub provider: String,
    pub claim: String,
}

/// Credential minted by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssuedCredential {
    /// Opaque bearer token, valid for the requested duration.
    pub token: String,
    /// The provider-side identity the logins resolved to.
    pub identity_id: String,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    /// The provider could not be reached or rejected the request outright.
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),

    /// The provider does not recognize the claimed user.
    #[error("unknown user: {0}")]
    UnknownUser(String),
}

/// Federated identity provider (e.g. Cognito developer identities).
#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange login claims for a credential valid for `ttl`.
    async fn exchange_for_token(
        &self,
        logins: &[Login],
        ttl: Duration,
    ) -> Result<IssuedCredential, IdentityError>;
}

/// Directory of hardware key fingerprints per user's registered devices.
#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait::async_trait]
pub trait DeviceDirectory: Send + Sync {
    /// Fingerprints of the user's registered device keys. A user with no
    /// registered devices yields an empty list.
    async fn device_fingerprints(&self, user_id: &UserId) -> Result<Vec<String>, IdentityError>;
}
