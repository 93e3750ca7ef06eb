//! Group lifecycle and membership operations.

use tracing::warn;
use uuid::Uuid;

use hearth_recognition::{CollectionId, RecognitionError};
use hearth_storage::{
    AddMembershipParams, CreateGroupParams, Group, GroupId, Membership, StoreError, UserId,
};

use crate::error::{Error, Result};
use crate::service::{DeviceGroupService, Member};

impl DeviceGroupService {
    /// Create a group with the caller as its owner.
    ///
    /// Three writes, in order: the group row, the face collection, the owner
    /// membership. A failure after the row is committed leaves a group
    /// without a collection or owner; that is logged and surfaced rather
    /// than rolled back, since the row insert is the uniqueness anchor.
    pub async fn create_group(&self, name: &str, owner: &UserId) -> Result<Group> {
        let params = CreateGroupParams {
            id: GroupId(Uuid::now_v7()),
            name: name.to_string(),
        };
        let group = self.store.create_group(&params).await.map_err(|e| match e {
            StoreError::AlreadyExists => Error::GroupAlreadyExists,
            e => Error::Store(e.to_string()),
        })?;

        let collection = CollectionId::from(&group.id);
        if let Err(e) = self.recognizer.create_collection(&collection).await {
            warn!(group_id = %group.id, error = %e, "group row committed without a face collection");
            return Err(Error::Recognition(e.to_string()));
        }

        self.store
            .add_membership(&AddMembershipParams {
                group_id: group.id.clone(),
                user_id: owner.clone(),
                is_owner: true,
            })
            .await
            .map_err(|e| {
                warn!(group_id = %group.id, error = %e, "group row committed without an owner");
                Error::Store(e.to_string())
            })?;

        Ok(group)
    }

    /// Fetch a group. Members only; everyone else gets `PermissionDenied`,
    /// whether or not the group exists.
    pub async fn get_group(&self, group_id: &GroupId, caller: &UserId) -> Result<Group> {
        self.require_member(group_id, caller).await?;
        self.store.get_group(group_id).await.map_err(|e| match e {
            StoreError::NotFound => Error::GroupNotFound,
            e => Error::Store(e.to_string()),
        })
    }

    /// Rename a group. Owners only.
    pub async fn rename_group(
        &self,
        group_id: &GroupId,
        caller: &UserId,
        name: &str,
    ) -> Result<Group> {
        self.require_owner(group_id, caller).await?;
        let mut group = self.store.get_group(group_id).await.map_err(|e| match e {
            StoreError::NotFound => Error::GroupNotFound,
            e => Error::Store(e.to_string()),
        })?;
        group.name = name.to_string();
        self.store.update_group(&group).await.map_err(|e| match e {
            StoreError::NotFound => Error::GroupNotFound,
            e => Error::Store(e.to_string()),
        })
    }

    /// Delete a group, its memberships, its face bindings, and its face
    /// collection. Owners only.
    pub async fn delete_group(&self, group_id: &GroupId, caller: &UserId) -> Result<()> {
        self.require_owner(group_id, caller).await?;
        self.store.delete_group(group_id).await.map_err(|e| match e {
            StoreError::NotFound => Error::GroupNotFound,
            e => Error::Store(e.to_string()),
        })?;

        let collection = CollectionId::from(group_id);
        match self.recognizer.delete_collection(&collection).await {
            Ok(()) => Ok(()),
            // Rows are gone either way; a missing collection is stale state
            // from an earlier partial create, not a caller-visible failure.
            Err(RecognitionError::CollectionNotFound(_)) => {
                warn!(group_id = %group_id, "deleted group had no face collection");
                Ok(())
            }
            Err(e) => Err(Error::Recognition(e.to_string())),
        }
    }

    /// Groups the user belongs to; `owner_only` narrows to groups they own.
    pub async fn list_groups(&self, user_id: &UserId, owner_only: bool) -> Result<Vec<Group>> {
        self.store
            .list_groups_for_user(user_id, owner_only)
            .await
            .map_err(|e| Error::Store(e.to_string()))
    }

    /// Join a group as a regular member.
    ///
    /// Admission is by device-key possession: the joining user must have a
    /// registered device whose key fingerprint matches one registered by a
    /// current owner, i.e. the owner physically shared a device with them.
    /// Anything short of that — unknown group, no shared device, no owners —
    /// is the same `JoinNotPermitted`.
    pub async fn join_group(&self, group_id: &GroupId, user_id: &UserId) -> Result<Membership> {
        let memberships = self
            .store
            .list_memberships(group_id)
            .await
            .map_err(|e| Error::Store(e.to_string()))?;
        let owners: Vec<&UserId> = memberships
            .iter()
            .filter(|m| m.is_owner)
            .map(|m| &m.user_id)
            .collect();

        let joiner_prints = self
            .devices
            .device_fingerprints(user_id)
            .await
            .map_err(|e| Error::IdentityServiceUnavailable(e.to_string()))?;

        let mut admitted = false;
        for owner in owners {
            let owner_prints = self
                .devices
                .device_fingerprints(owner)
                .await
                .map_err(|e| Error::IdentityServiceUnavailable(e.to_string()))?;
            if owner_prints.iter().any(|p| joiner_prints.contains(p)) {
                admitted = true;
                break;
            }
        }
        if !admitted {
            return Err(Error::JoinNotPermitted);
        }

        self.store
            .add_membership(&AddMembershipParams {
                group_id: group_id.clone(),
                user_id: user_id.clone(),
                is_owner: false,
            })
            .await
            .map_err(|e| match e {
                StoreError::AlreadyExists => Error::UserAlreadyInGroup,
                // The group vanished between the owner scan and the insert.
                StoreError::NotFound => Error::JoinNotPermitted,
                e => Error::Store(e.to_string()),
            })
    }

    /// Remove a member, along with their enrolled faces in this group.
    /// Members may remove themselves; owners may remove anyone.
    pub async fn remove_member(
        &self,
        group_id: &GroupId,
        caller: &UserId,
        target: &UserId,
    ) -> Result<()> {
        if caller == target {
            self.require_member(group_id, caller).await?;
        } else {
            self.require_owner(group_id, caller).await?;
        }

        self.unenroll_all(group_id, target).await?;

        self.store
            .delete_membership(group_id, target)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => Error::MembershipNotFound,
                e => Error::Store(e.to_string()),
            })
    }

    /// Add a user directly, bypassing the device-key check. Owners only.
    pub async fn add_member(
        &self,
        group_id: &GroupId,
        caller: &UserId,
        target: &UserId,
        is_owner: bool,
    ) -> Result<()> {
        self.require_owner(group_id, caller).await?;
        self.store
            .add_membership(&AddMembershipParams {
                group_id: group_id.clone(),
                user_id: target.clone(),
                is_owner,
            })
            .await
            .map_err(|e| match e {
                StoreError::AlreadyExists => Error::UserAlreadyInGroup,
                StoreError::NotFound => Error::GroupNotFound,
                e => Error::Store(e.to_string()),
            })?;
        Ok(())
    }

    /// One member with their enrolled-face count. Users may look at
    /// themselves; owners at anyone.
    pub async fn get_member(
        &self,
        group_id: &GroupId,
        caller: &UserId,
        target: &UserId,
    ) -> Result<Member> {
        let membership = if caller == target {
            self.require_member(group_id, caller).await?
        } else {
            self.require_owner(group_id, caller).await?;
            self.require_target_member(group_id, target).await?
        };
        let bindings = self
            .store
            .list_face_bindings(group_id, target)
            .await
            .map_err(|e| Error::Store(e.to_string()))?;
        Ok(Member {
            user_id: membership.user_id,
            is_owner: membership.is_owner,
            joined_at: membership.created_at,
            face_count: bindings.len(),
        })
    }

    /// List the group's members with their enrolled-face counts. Owners only.
    pub async fn list_members(&self, group_id: &GroupId, caller: &UserId) -> Result<Vec<Member>> {
        self.require_owner(group_id, caller).await?;
        let memberships = self
            .store
            .list_memberships(group_id)
            .await
            .map_err(|e| Error::Store(e.to_string()))?;

        let mut members = Vec::with_capacity(memberships.len());
        for membership in memberships {
            let bindings = self
                .store
                .list_face_bindings(group_id, &membership.user_id)
                .await
                .map_err(|e| Error::Store(e.to_string()))?;
            members.push(Member {
                user_id: membership.user_id,
                is_owner: membership.is_owner,
                joined_at: membership.created_at,
                face_count: bindings.len(),
            });
        }
        Ok(members)
    }
}
