//! Device group types.

use chrono::{DateTime, Utc};

use super::GroupId;

/// Device group record. The id is immutable; the name may be changed by an
/// owner after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for creating a group.
///
/// The caller generates the id so the insert can be expressed as a single
/// conditional write (fail [`crate::StoreError::AlreadyExists`] on collision).
#[derive(Clone, Debug)]
pub struct CreateGroupParams {
    pub id: GroupId,
    pub name: String,
}
