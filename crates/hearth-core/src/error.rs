//! Service error taxonomy.
//!
//! Every fallible operation returns one of these variants; callers match on
//! them instead of parsing messages. Collaborator errors are classified at
//! the call site: a store `NotFound` becomes whichever domain variant the
//! operation was looking up, and only unclassified backend failures fall
//! through to the transport variants at the bottom.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("group not found")]
    GroupNotFound,

    #[error("membership not found")]
    MembershipNotFound,

    #[error("integration not found")]
    IntegrationNotFound,

    #[error("group already exists")]
    GroupAlreadyExists,

    #[error("user is already a member of the group")]
    UserAlreadyInGroup,

    /// The caller lacks the membership or ownership the operation requires.
    /// Also returned when the group does not exist, so a caller cannot
    /// probe for group existence through authorization failures.
    #[error("permission denied")]
    PermissionDenied,

    #[error("no face detected in image")]
    NoFaceInImage,

    #[error("face not recognized")]
    FaceNotRecognized,

    /// None of the joining user's device keys match a device registered by
    /// a group owner.
    #[error("join not permitted")]
    JoinNotPermitted,

    /// Too few usable samples. Any bindings indexed before the shortfall
    /// was detected remain persisted; re-enrolling adds to them.
    #[error("enrollment rejected: {enrolled} usable samples, minimum is {minimum}")]
    EnrollmentRejected { enrolled: usize, minimum: usize },

    #[error("identity service unavailable: {0}")]
    IdentityServiceUnavailable(String),

    #[error("storage error: {0}")]
    Store(String),

    #[error("recognition error: {0}")]
    Recognition(String),
}

pub type Result<T> = std::result::Result<T, Error>;
