//! Face binding types.

use super::{FaceId, GroupId, UserId};

/// One row per enrolled face sample, linking a recognition-service face id
/// back to the user it was enrolled for.
///
/// Invariant: within a group, a face id maps to exactly one user. The
/// recognition service guarantees biometric uniqueness within a collection
/// at high match threshold; the store guarantees the binding lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceBinding {
    pub group_id: GroupId,
    pub face_id: FaceId,
    pub user_id: UserId,
}
