//! The Store trait that backends implement.

use crate::types::*;
use crate::StoreError;

/// The storage trait the hearth core depends on.
///
/// Concurrency contract: every mutating method is a **single atomic
/// compare-and-act** against current store state — the existence check is
/// fused with the mutation (DynamoDB-style conditional expressions, a SQL
/// transaction, or a lock over the tables). Two requests racing on the same
/// key must resolve deterministically: one succeeds, the other observes
/// `NotFound`/`AlreadyExists`. Test-then-act sequences are not conformant.
#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    // ───────────────────────────────────── Groups ─────────────────────────────────────

    /// Insert a new group, conditional on the id not existing.
    /// Id collision fails `AlreadyExists` (astronomically rare, still enforced).
    async fn create_group(&self, params: &CreateGroupParams) -> Result<Group, StoreError>;

    /// Get a group by id. Fails `NotFound` if absent.
    async fn get_group(&self, group_id: &GroupId) -> Result<Group, StoreError>;

    /// Update a group's mutable fields, conditional on existence; returns
    /// the row as written. Fails `NotFound` if absent.
    async fn update_group(&self, group: &Group) -> Result<Group, StoreError>;

    /// Atomic test-and-delete of a group row. Fails `NotFound` if absent.
    /// Cascades the group's membership and face-binding rows.
    async fn delete_group(&self, group_id: &GroupId) -> Result<(), StoreError>;

    /// Groups a user belongs to: resolve membership rows via the user
    /// secondary index, then batch-fetch the group rows. A user with no
    /// memberships yields an empty list, not an error.
    async fn list_groups_for_user(
        &self,
        user_id: &UserId,
        owner_only: bool,
    ) -> Result<Vec<Group>, StoreError>;

    // ───────────────────────────────────── Memberships ─────────────────────────────────────

    /// Add a user to a group. Fails `NotFound` if the group does not exist
    /// and `AlreadyExists` if the `(group, user)` pair does; both conditions
    /// are evaluated atomically against current state, not a prior read.
    async fn add_membership(&self, params: &AddMembershipParams)
        -> Result<Membership, StoreError>;

    /// Get a membership by `(group, user)`. Fails `NotFound` if absent.
    async fn get_membership(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<Membership, StoreError>;

    /// Atomic test-and-delete of a membership. Fails `NotFound` if absent.
    async fn delete_membership(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<(), StoreError>;

    /// All memberships of a group.
    async fn list_memberships(&self, group_id: &GroupId) -> Result<Vec<Membership>, StoreError>;

    // ───────────────────────────────────── Face bindings ─────────────────────────────────────

    /// Batch-insert face bindings (one row per indexed sample).
    async fn put_face_bindings(&self, bindings: &[FaceBinding]) -> Result<(), StoreError>;

    /// Look up the binding for `(group, face)`. Fails `NotFound` if absent.
    async fn get_face_binding(
        &self,
        group_id: &GroupId,
        face_id: &FaceId,
    ) -> Result<FaceBinding, StoreError>;

    /// All bindings for a `(group, user)` pair, via the pair secondary index.
    async fn list_face_bindings(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<Vec<FaceBinding>, StoreError>;

    /// Delete one binding row. Fails `NotFound` if absent.
    async fn delete_face_binding(
        &self,
        group_id: &GroupId,
        face_id: &FaceId,
    ) -> Result<(), StoreError>;

    // ───────────────────────────────────── Integrations ─────────────────────────────────────

    /// The available integrations (read-only registry).
    async fn list_integrations(&self) -> Result<Vec<Integration>, StoreError>;

    /// Get one integration by id. Fails `NotFound` if absent.
    async fn get_integration(&self, id: &IntegrationId) -> Result<Integration, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    // Tiny compile-time smoke test for trait object usage.
    struct NoopStore;

    #[async_trait::async_trait]
    impl Store for NoopStore {
        async fn create_group(&self, params: &CreateGroupParams) -> Result<Group, StoreError> {
            Ok(Group {
                id: params.id.clone(),
                name: params.name.clone(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        }

        async fn get_group(&self, _group_id: &GroupId) -> Result<Group, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn update_group(&self, _group: &Group) -> Result<Group, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn delete_group(&self, _group_id: &GroupId) -> Result<(), StoreError> {
            Err(StoreError::NotFound)
        }

        async fn list_groups_for_user(
            &self,
            _user_id: &UserId,
            _owner_only: bool,
        ) -> Result<Vec<Group>, StoreError> {
            Ok(vec![])
        }

        async fn add_membership(
            &self,
            _params: &AddMembershipParams,
        ) -> Result<Membership, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn get_membership(
            &self,
            _group_id: &GroupId,
            _user_id: &UserId,
        ) -> Result<Membership, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn delete_membership(
            &self,
            _group_id: &GroupId,
            _user_id: &UserId,
        ) -> Result<(), StoreError> {
            Err(StoreError::NotFound)
        }

        async fn list_memberships(
            &self,
            _group_id: &GroupId,
        ) -> Result<Vec<Membership>, StoreError> {
            Ok(vec![])
        }

        async fn put_face_bindings(&self, _bindings: &[FaceBinding]) -> Result<(), StoreError> {
            Ok(())
        }

        async fn get_face_binding(
            &self,
            _group_id: &GroupId,
            _face_id: &FaceId,
        ) -> Result<FaceBinding, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn list_face_bindings(
            &self,
            _group_id: &GroupId,
            _user_id: &UserId,
        ) -> Result<Vec<FaceBinding>, StoreError> {
            Ok(vec![])
        }

        async fn delete_face_binding(
            &self,
            _group_id: &GroupId,
            _face_id: &FaceId,
        ) -> Result<(), StoreError> {
            Err(StoreError::NotFound)
        }

        async fn list_integrations(&self) -> Result<Vec<Integration>, StoreError> {
            Ok(vec![])
        }

        async fn get_integration(&self, _id: &IntegrationId) -> Result<Integration, StoreError> {
            Err(StoreError::NotFound)
        }
    }

    #[tokio::test]
    async fn trait_smoke() {
        let s: Box<dyn Store> = Box::new(NoopStore);

        let group = s
            .create_group(&CreateGroupParams {
                id: GroupId(Uuid::now_v7()),
                name: "kitchen".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(group.name, "kitchen");

        let user = UserId::new("eu-west-1:alice");
        assert!(s.list_groups_for_user(&user, false).await.unwrap().is_empty());
        assert!(matches!(
            s.get_membership(&group.id, &user).await,
            Err(StoreError::NotFound)
        ));
    }
}
