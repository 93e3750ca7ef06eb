//! Face-to-user resolution.

use tracing::warn;

use hearth_recognition::{CollectionId, RecognitionError};
use hearth_storage::{GroupId, StoreError};

use crate::error::{Error, Result};
use crate::service::{DeviceGroupService, Resolution};

impl DeviceGroupService {
    /// Resolve a face image to a member of the group.
    ///
    /// The collection is searched at the configured threshold and candidate
    /// cap; only the top-ranked candidate is considered, so the outcome is
    /// deterministic even when several members clear the threshold. Called
    /// on behalf of a group device, not a user — device authentication is
    /// the transport's job.
    pub async fn resolve_face(&self, group_id: &GroupId, image: &[u8]) -> Result<Resolution> {
        let collection = CollectionId::from(group_id);
        let matches = self
            .recognizer
            .search_faces_by_image(
                &collection,
                image,
                self.config.match_threshold,
                self.config.max_candidates,
            )
            .await
            .map_err(|e| match e {
                RecognitionError::NoFaceDetected => Error::NoFaceInImage,
                RecognitionError::CollectionNotFound(_) => Error::GroupNotFound,
                e => Error::Recognition(e.to_string()),
            })?;

        let top = matches.first().ok_or(Error::FaceNotRecognized)?;

        let binding = self
            .store
            .get_face_binding(group_id, &top.face_id)
            .await
            .map_err(|e| match e {
                // The face is indexed but its owner is no longer bound —
                // stale collection state, e.g. a half-finished unenrollment.
                StoreError::NotFound => {
                    warn!(group_id = %group_id, face_id = %top.face_id.0, "matched face has no binding");
                    Error::FaceNotRecognized
                }
                e => Error::Store(e.to_string()),
            })?;

        Ok(Resolution {
            user_id: binding.user_id,
            confidence: top.confidence,
        })
    }
}
