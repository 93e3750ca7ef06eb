//! Group membership types.

use chrono::{DateTime, Utc};

use super::{GroupId, UserId};

/// Membership record, keyed by `(group_id, user_id)` — a user appears at
/// most once per group. A group may have zero or more owners.
///
/// The enrolled-face count for a member is a derived attribute computed
/// from face bindings, never stored here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Membership {
    pub group_id: GroupId,
    pub user_id: UserId,
    pub is_owner: bool,
    pub created_at: DateTime<Utc>,
}

/// Parameters for adding a membership.
#[derive(Clone, Debug)]
pub struct AddMembershipParams {
    pub group_id: GroupId,
    pub user_id: UserId,
    pub is_owner: bool,
}
