//! Credential issuance against the federated identity provider.

use hearth_identity::{IssuedCredential, Login};
use hearth_storage::{GroupId, UserId};

use crate::error::{Error, Result};
use crate::service::{DeviceGroupService, FaceAuth};

impl DeviceGroupService {
    /// Mint a credential for an already-resolved user. The user rides in as
    /// the developer-provider claim; `federated` carries a provider claim
    /// the device already holds (e.g. a linked social login), if any.
    pub async fn issue_credential(
        &self,
        user_id: &UserId,
        federated: Option<Login>,
    ) -> Result<IssuedCredential> {
        let mut logins = Vec::with_capacity(2);
        logins.push(Login {
            provider: self.config.developer_provider.clone(),
            claim: user_id.0.clone(),
        });
        logins.extend(federated);

        self.identity
            .exchange_for_token(&logins, self.config.token_ttl)
            .await
            .map_err(|e| Error::IdentityServiceUnavailable(e.to_string()))
    }

    /// Authenticate a face image end to end: resolve it to a member, then
    /// exchange that member for a credential.
    pub async fn authenticate_face(&self, group_id: &GroupId, image: &[u8]) -> Result<FaceAuth> {
        let resolution = self.resolve_face(group_id, image).await?;
        let credential = self.issue_credential(&resolution.user_id, None).await?;
        Ok(FaceAuth {
            user_id: resolution.user_id,
            token: credential.token,
            identity_id: credential.identity_id,
        })
    }
}
