//! Strongly-typed identifiers (avoid mixing strings/UUIDs arbitrarily).

use std::fmt;

use uuid::Uuid;

/// Device group identifier. Generated locally (UUID v7) at creation time
/// and immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(pub Uuid);

/// User identifier. Opaque string issued by the external identity pool
/// (e.g. `eu-west-1:4f1d...`), never parsed by this crate.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub String);

/// Face identifier. Opaque id issued by the face-recognition service when
/// a sample is indexed into a collection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FaceId(pub String);

/// Integration identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IntegrationId(pub String);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
