//! In-memory [`FaceRecognizer`] backend.
//!
//! Stands in for the real recognition service in tests. "Images" are byte
//! strings in a tiny label grammar: `;`-separated tokens, each a label with
//! an optional confidence, e.g. `b"alice~97.5;bob~60"`. Indexing records the
//! first token's label for the new face; searching compares the probe's
//! tokens against recorded labels and reports one match per hit, ranked by
//! confidence. An empty image (no tokens) has no detectable face.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use hearth_recognition::{CollectionId, FaceMatch, FaceRecognizer, RecognitionError};
use hearth_storage::FaceId;

const DEFAULT_CONFIDENCE: f32 = 99.0;

struct IndexedFace {
    label: String,
    external_tag: String,
}

#[derive(Default)]
struct Inner {
    collections: HashMap<CollectionId, HashMap<FaceId, IndexedFace>>,
}

/// Label-matching recognizer. One instance per test.
#[derive(Default)]
pub struct MemoryRecognizer {
    inner: RwLock<Inner>,
}

fn parse_tokens(image: &[u8]) -> Result<Vec<(String, f32)>, RecognitionError> {
    let text = std::str::from_utf8(image)
        .map_err(|_| RecognitionError::Unavailable("image is not valid utf-8".to_string()))?;
    let tokens: Vec<(String, f32)> = text
        .split(';')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|token| match token.split_once('~') {
            Some((label, confidence)) => {
                let confidence = confidence.parse().unwrap_or(DEFAULT_CONFIDENCE);
                (label.to_string(), confidence)
            }
            None => (token.to_string(), DEFAULT_CONFIDENCE),
        })
        .collect();
    if tokens.is_empty() {
        return Err(RecognitionError::NoFaceDetected);
    }
    Ok(tokens)
}

impl MemoryRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tag a face was indexed with (what a real service would echo back
    /// as the external image id). `None` for unknown collections or faces.
    pub async fn external_tag(
        &self,
        collection: &CollectionId,
        face_id: &FaceId,
    ) -> Option<String> {
        let inner = self.inner.read().await;
        inner
            .collections
            .get(collection)?
            .get(face_id)
            .map(|face| face.external_tag.clone())
    }
}

#[async_trait::async_trait]
impl FaceRecognizer for MemoryRecognizer {
    async fn create_collection(&self, collection: &CollectionId) -> Result<(), RecognitionError> {
        let mut inner = self.inner.write().await;
        inner.collections.entry(collection.clone()).or_default();
        Ok(())
    }

    async fn delete_collection(&self, collection: &CollectionId) -> Result<(), RecognitionError> {
        let mut inner = self.inner.write().await;
        inner
            .collections
            .remove(collection)
            .map(|_| ())
            .ok_or_else(|| RecognitionError::CollectionNotFound(collection.0.clone()))
    }

    async fn index_face(
        &self,
        collection: &CollectionId,
        image: &[u8],
        external_tag: &str,
    ) -> Result<FaceId, RecognitionError> {
        let tokens = parse_tokens(image)?;
        let mut inner = self.inner.write().await;
        let faces = inner
            .collections
            .get_mut(collection)
            .ok_or_else(|| RecognitionError::CollectionNotFound(collection.0.clone()))?;
        let face_id = FaceId(Uuid::new_v4().to_string());
        faces.insert(
            face_id.clone(),
            IndexedFace {
                label: tokens[0].0.clone(),
                external_tag: external_tag.to_string(),
            },
        );
        Ok(face_id)
    }

    async fn search_faces_by_image(
        &self,
        collection: &CollectionId,
        image: &[u8],
        threshold: f32,
        max_candidates: usize,
    ) -> Result<Vec<FaceMatch>, RecognitionError> {
        let tokens = parse_tokens(image)?;
        let inner = self.inner.read().await;
        let faces = inner
            .collections
            .get(collection)
            .ok_or_else(|| RecognitionError::CollectionNotFound(collection.0.clone()))?;

        let mut matches: Vec<FaceMatch> = faces
            .iter()
            .filter_map(|(face_id, face)| {
                tokens
                    .iter()
                    .filter(|(label, _)| label == &face.label)
                    .map(|(_, confidence)| *confidence)
                    .fold(None, |best: Option<f32>, c| {
                        Some(best.map_or(c, |b| b.max(c)))
                    })
                    .map(|confidence| FaceMatch {
                        face_id: face_id.clone(),
                        confidence,
                    })
            })
            .filter(|m| m.confidence >= threshold)
            .collect();
        matches.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.face_id.0.cmp(&b.face_id.0))
        });
        matches.truncate(max_candidates);
        Ok(matches)
    }

    async fn delete_faces(
        &self,
        collection: &CollectionId,
        face_ids: &[FaceId],
    ) -> Result<(), RecognitionError> {
        let mut inner = self.inner.write().await;
        let faces = inner
            .collections
            .get_mut(collection)
            .ok_or_else(|| RecognitionError::CollectionNotFound(collection.0.clone()))?;
        for face_id in face_ids {
            faces.remove(face_id);
        }
        Ok(())
    }
}
