//! Face recognition collaborator trait.
//!
//! Each device group owns an isolated face collection in the recognition
//! service; enrollment indexes samples into it and authentication searches
//! it by image. Backends (e.g. AWS Rekognition, or the in-memory simulator
//! in hearth-recognition-memory) implement [`FaceRecognizer`]; the core
//! depends only on this trait.

use thiserror::Error;

use hearth_storage::{FaceId, GroupId};

/// Identifier of a face collection. One collection per device group; the
/// collection id is derived from the group id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CollectionId(pub String);

impl From<&GroupId> for CollectionId {
    fn from(group_id: &GroupId) -> Self {
        Self(group_id.0.to_string())
    }
}

/// One candidate from a search-by-image, as ranked by the service.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceMatch {
    pub face_id: FaceId,
    /// Match confidence in percent (0.0–100.0).
    pub confidence: f32,
}

/// Recognition service error, classified at the point of call.
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// The submitted image contains zero detectable faces.
    #[error("no face detected in image")]
    NoFaceDetected,

    /// The collection does not exist.
    #[error("collection {0} not found")]
    CollectionNotFound(String),

    /// The service could not be reached or returned an unclassified error.
    #[error("recognition service unavailable: {0}")]
    Unavailable(String),
}

/// Client contract for the external face-recognition service.
#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait::async_trait]
pub trait FaceRecognizer: Send + Sync {
    /// Create the collection. Called once per group, after the group row
    /// is committed.
    async fn create_collection(&self, collection: &CollectionId) -> Result<(), RecognitionError>;

    /// Delete the collection and every face in it. Called once per group,
    /// after the group row delete succeeds.
    async fn delete_collection(&self, collection: &CollectionId) -> Result<(), RecognitionError>;

    /// Index one face sample into the collection, tagged with an external
    /// id (the enrolling user). Returns the service-issued face id, or
    /// [`RecognitionError::NoFaceDetected`] if the image contains no face.
    async fn index_face(
        &self,
        collection: &CollectionId,
        image: &[u8],
        external_tag: &str,
    ) -> Result<FaceId, RecognitionError>;

    /// Search the collection by image. Returns candidates at or above
    /// `threshold` (percent), ranked by descending confidence by the
    /// service itself, at most `max_candidates` of them. An empty result is
    /// a successful "no match"; a probe without a detectable face fails
    /// [`RecognitionError::NoFaceDetected`].
    async fn search_faces_by_image(
        &self,
        collection: &CollectionId,
        image: &[u8],
        threshold: f32,
        max_candidates: usize,
    ) -> Result<Vec<FaceMatch>, RecognitionError>;

    /// Remove faces from the collection. Unknown ids are skipped, so a
    /// retry after partial failure is idempotent.
    async fn delete_faces(
        &self,
        collection: &CollectionId,
        face_ids: &[FaceId],
    ) -> Result<(), RecognitionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn collection_id_from_group_id() {
        let uuid = Uuid::new_v4();
        let group_id = GroupId(uuid);
        let collection = CollectionId::from(&group_id);
        assert_eq!(collection.0, uuid.to_string());
    }
}
