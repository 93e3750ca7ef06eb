//! The device-group service and its collaborator wiring.

use std::sync::Arc;

use hearth_identity::{DeviceDirectory, IdentityProvider};
use hearth_recognition::FaceRecognizer;
use hearth_storage::{GroupId, Membership, Store, StoreError, UserId};

use crate::config::ServiceConfig;
use crate::error::{Error, Result};

/// Group-membership and face-identity resolution service.
///
/// All collaborators are injected; construct one per process with real
/// backends, or per test with in-memory or mock ones.
pub struct DeviceGroupService {
    pub(crate) store: Arc<dyn Store>,
    pub(crate) recognizer: Arc<dyn FaceRecognizer>,
    pub(crate) identity: Arc<dyn IdentityProvider>,
    pub(crate) devices: Arc<dyn DeviceDirectory>,
    pub(crate) config: ServiceConfig,
}

/// A group member as seen by other members.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub user_id: UserId,
    pub is_owner: bool,
    pub joined_at: chrono::DateTime<chrono::Utc>,
    /// Number of face samples the member has enrolled in this group.
    pub face_count: usize,
}

/// Outcome of resolving a face image within a group.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub user_id: UserId,
    /// Match confidence of the winning candidate, in percent.
    pub confidence: f32,
}

/// Outcome of a full face authentication: who it was, plus a credential.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceAuth {
    pub user_id: UserId,
    pub token: String,
    pub identity_id: String,
}

impl DeviceGroupService {
    pub fn new(
        store: Arc<dyn Store>,
        recognizer: Arc<dyn FaceRecognizer>,
        identity: Arc<dyn IdentityProvider>,
        devices: Arc<dyn DeviceDirectory>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            store,
            recognizer,
            identity,
            devices,
            config,
        }
    }

    /// The caller's membership, or `None` if the caller is not a member —
    /// including when the group itself does not exist. Callers that need
    /// authorization use [`Self::require_member`] / [`Self::require_owner`],
    /// which collapse both cases into `PermissionDenied` so a non-member
    /// cannot distinguish "no such group" from "not yours".
    pub(crate) async fn membership_of(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<Option<Membership>> {
        match self.store.get_membership(group_id, user_id).await {
            Ok(membership) => Ok(Some(membership)),
            Err(StoreError::NotFound) => Ok(None),
            Err(e) => Err(Error::Store(e.to_string())),
        }
    }

    pub(crate) async fn require_member(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<Membership> {
        self.membership_of(group_id, user_id)
            .await?
            .ok_or(Error::PermissionDenied)
    }

    pub(crate) async fn require_owner(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<Membership> {
        let membership = self.require_member(group_id, user_id).await?;
        if !membership.is_owner {
            return Err(Error::PermissionDenied);
        }
        Ok(membership)
    }

    /// Membership of someone the caller is operating on. Only reached after
    /// the caller has already been authorized, so the miss is allowed to be
    /// specific.
    pub(crate) async fn require_target_member(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<Membership> {
        self.membership_of(group_id, user_id)
            .await?
            .ok_or(Error::MembershipNotFound)
    }
}
