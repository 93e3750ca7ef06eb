//! Face enrollment and unenrollment.

use tracing::{debug, warn};

use hearth_recognition::{CollectionId, RecognitionError};
use hearth_storage::{FaceBinding, GroupId, StoreError, UserId};

use crate::error::{Error, Result};
use crate::service::DeviceGroupService;

impl DeviceGroupService {
    /// Enroll a member's face in a group from a batch of image samples.
    /// Users enroll themselves; owners may enroll any member.
    ///
    /// Every sample with a detectable face is indexed and its binding
    /// persisted; samples without one are skipped. If fewer usable samples
    /// than the configured minimum came through, the call fails with
    /// [`Error::EnrollmentRejected`] — but the bindings already written
    /// stay, so a follow-up batch only needs to cover the shortfall.
    ///
    /// Returns the number of samples indexed by this call.
    pub async fn enroll_faces(
        &self,
        group_id: &GroupId,
        caller: &UserId,
        target: &UserId,
        samples: &[Vec<u8>],
    ) -> Result<usize> {
        if caller == target {
            self.require_member(group_id, caller).await?;
        } else {
            self.require_owner(group_id, caller).await?;
            self.require_target_member(group_id, target).await?;
        }

        let collection = CollectionId::from(group_id);
        let mut bindings = Vec::with_capacity(samples.len());
        for (i, sample) in samples.iter().enumerate() {
            match self
                .recognizer
                .index_face(&collection, sample, target.as_str())
                .await
            {
                Ok(face_id) => bindings.push(FaceBinding {
                    group_id: group_id.clone(),
                    face_id,
                    user_id: target.clone(),
                }),
                Err(RecognitionError::NoFaceDetected) => {
                    debug!(group_id = %group_id, sample = i, "sample skipped, no face detected");
                }
                Err(RecognitionError::CollectionNotFound(_)) => return Err(Error::GroupNotFound),
                Err(e) => return Err(Error::Recognition(e.to_string())),
            }
        }

        if !bindings.is_empty() {
            self.store
                .put_face_bindings(&bindings)
                .await
                .map_err(|e| Error::Store(e.to_string()))?;
        }

        let enrolled = bindings.len();
        if enrolled < self.config.min_enrolled_faces {
            return Err(Error::EnrollmentRejected {
                enrolled,
                minimum: self.config.min_enrolled_faces,
            });
        }
        Ok(enrolled)
    }

    /// Remove a user's enrolled faces from a group. Users may unenroll
    /// themselves; owners may unenroll anyone.
    ///
    /// Returns the number of faces removed; zero if none were enrolled.
    pub async fn unenroll_faces(
        &self,
        group_id: &GroupId,
        caller: &UserId,
        target: &UserId,
    ) -> Result<usize> {
        if caller == target {
            self.require_member(group_id, caller).await?;
        } else {
            self.require_owner(group_id, caller).await?;
        }
        self.unenroll_all(group_id, target).await
    }

    /// Number of faces a member has enrolled in a group; derived from the
    /// binding rows, never stored. Users may ask about themselves; owners
    /// about anyone.
    pub async fn face_count(
        &self,
        group_id: &GroupId,
        caller: &UserId,
        target: &UserId,
    ) -> Result<usize> {
        if caller == target {
            self.require_member(group_id, caller).await?;
        } else {
            self.require_owner(group_id, caller).await?;
        }
        let bindings = self
            .store
            .list_face_bindings(group_id, target)
            .await
            .map_err(|e| Error::Store(e.to_string()))?;
        Ok(bindings.len())
    }

    /// Unenrollment body, shared with member removal. Deletes from the
    /// recognition service first: if that fails, the binding rows survive
    /// and a retry covers the same faces again. Binding rows already gone
    /// are skipped, so the retry is idempotent.
    pub(crate) async fn unenroll_all(&self, group_id: &GroupId, target: &UserId) -> Result<usize> {
        let bindings = self
            .store
            .list_face_bindings(group_id, target)
            .await
            .map_err(|e| Error::Store(e.to_string()))?;
        if bindings.is_empty() {
            return Ok(0);
        }

        let face_ids: Vec<_> = bindings.iter().map(|b| b.face_id.clone()).collect();
        let collection = CollectionId::from(group_id);
        match self.recognizer.delete_faces(&collection, &face_ids).await {
            Ok(()) => {}
            // The collection is already gone, and the faces with it; only
            // the binding rows are left to clean up.
            Err(RecognitionError::CollectionNotFound(_)) => {
                warn!(group_id = %group_id, "unenrolling against a missing face collection");
            }
            Err(e) => return Err(Error::Recognition(e.to_string())),
        }

        for binding in &bindings {
            match self
                .store
                .delete_face_binding(group_id, &binding.face_id)
                .await
            {
                Ok(()) | Err(StoreError::NotFound) => {}
                Err(e) => return Err(Error::Store(e.to_string())),
            }
        }
        Ok(bindings.len())
    }
}
