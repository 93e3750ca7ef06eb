//! In-memory [`Store`] backend.
//!
//! All tables live behind a single `RwLock`, so every conditional write is
//! evaluated against current state under one lock — the same atomicity a
//! durable backend gets from conditional expressions or transactions.
//! Intended for tests and local development.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use hearth_storage::{
    AddMembershipParams, CreateGroupParams, FaceBinding, FaceId, Group, GroupId, Integration,
    IntegrationId, Membership, Store, StoreError, UserId,
};

#[derive(Default)]
struct Inner {
    groups: HashMap<GroupId, Group>,
    memberships: HashMap<(GroupId, UserId), Membership>,
    bindings: HashMap<(GroupId, FaceId), FaceBinding>,
    integrations: HashMap<IntegrationId, Integration>,
}

/// Hash-map backed store. Cheap to construct, one per test.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provision an integration row. The trait surface is read-only for
    /// integrations; provisioning happens out of band, which for this
    /// backend means here.
    pub async fn seed_integration(&self, integration: Integration) {
        let mut inner = self.inner.write().await;
        inner.integrations.insert(integration.id.clone(), integration);
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn create_group(&self, params: &CreateGroupParams) -> Result<Group, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.groups.contains_key(&params.id) {
            return Err(StoreError::AlreadyExists);
        }
        let now = Utc::now();
        let group = Group {
            id: params.id.clone(),
            name: params.name.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.groups.insert(group.id.clone(), group.clone());
        Ok(group)
    }

    async fn get_group(&self, group_id: &GroupId) -> Result<Group, StoreError> {
        let inner = self.inner.read().await;
        inner.groups.get(group_id).cloned().ok_or(StoreError::NotFound)
    }

    async fn update_group(&self, group: &Group) -> Result<Group, StoreError> {
        let mut inner = self.inner.write().await;
        let row = inner.groups.get_mut(&group.id).ok_or(StoreError::NotFound)?;
        row.name = group.name.clone();
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete_group(&self, group_id: &GroupId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.groups.remove(group_id).ok_or(StoreError::NotFound)?;
        inner.memberships.retain(|(gid, _), _| gid != group_id);
        inner.bindings.retain(|(gid, _), _| gid != group_id);
        Ok(())
    }

    async fn list_groups_for_user(
        &self,
        user_id: &UserId,
        owner_only: bool,
    ) -> Result<Vec<Group>, StoreError> {
        let inner = self.inner.read().await;
        let mut groups: Vec<Group> = inner
            .memberships
            .values()
            .filter(|m| &m.user_id == user_id && (!owner_only || m.is_owner))
            .filter_map(|m| inner.groups.get(&m.group_id).cloned())
            .collect();
        groups.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(groups)
    }

    async fn add_membership(
        &self,
        params: &AddMembershipParams,
    ) -> Result<Membership, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.groups.contains_key(&params.group_id) {
            return Err(StoreError::NotFound);
        }
        let key = (params.group_id.clone(), params.user_id.clone());
        if inner.memberships.contains_key(&key) {
            return Err(StoreError::AlreadyExists);
        }
        let membership = Membership {
            group_id: params.group_id.clone(),
            user_id: params.user_id.clone(),
            is_owner: params.is_owner,
            created_at: Utc::now(),
        };
        inner.memberships.insert(key, membership.clone());
        Ok(membership)
    }

    async fn get_membership(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<Membership, StoreError> {
        let inner = self.inner.read().await;
        inner
            .memberships
            .get(&(group_id.clone(), user_id.clone()))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn delete_membership(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .memberships
            .remove(&(group_id.clone(), user_id.clone()))
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn list_memberships(&self, group_id: &GroupId) -> Result<Vec<Membership>, StoreError> {
        let inner = self.inner.read().await;
        let mut rows: Vec<Membership> = inner
            .memberships
            .values()
            .filter(|m| &m.group_id == group_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(rows)
    }

    async fn put_face_bindings(&self, bindings: &[FaceBinding]) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        for binding in bindings {
            inner.bindings.insert(
                (binding.group_id.clone(), binding.face_id.clone()),
                binding.clone(),
            );
        }
        Ok(())
    }

    async fn get_face_binding(
        &self,
        group_id: &GroupId,
        face_id: &FaceId,
    ) -> Result<FaceBinding, StoreError> {
        let inner = self.inner.read().await;
        inner
            .bindings
            .get(&(group_id.clone(), face_id.clone()))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_face_bindings(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<Vec<FaceBinding>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .bindings
            .values()
            .filter(|b| &b.group_id == group_id && &b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_face_binding(
        &self,
        group_id: &GroupId,
        face_id: &FaceId,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .bindings
            .remove(&(group_id.clone(), face_id.clone()))
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn list_integrations(&self) -> Result<Vec<Integration>, StoreError> {
        let inner = self.inner.read().await;
        let mut rows: Vec<Integration> = inner.integrations.values().cloned().collect();
        rows.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(rows)
    }

    async fn get_integration(&self, id: &IntegrationId) -> Result<Integration, StoreError> {
        let inner = self.inner.read().await;
        inner.integrations.get(id).cloned().ok_or(StoreError::NotFound)
    }
}
