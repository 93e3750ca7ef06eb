//! Storage abstraction for hearth.
//!
//! Backend crates (e.g., hearth-store-memory, or a DynamoDB-backed store)
//! implement the [`Store`] trait so the core never depends on a specific
//! database engine or schema details. Every mutating operation is specified
//! as a single atomic compare-and-act against current store state; see the
//! per-method docs on [`Store`].

mod store;
mod types;

use thiserror::Error;

pub use store::Store;
pub use types::*;

#[cfg(feature = "test-support")]
pub use store::MockStore;

/// Uniform error type for all storage backends.
///
/// Backends classify their native errors into these variants at the point
/// of call; raw driver errors never cross this boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    #[error("already exists")]
    AlreadyExists,
    #[error("backend error: {0}")]
    Backend(String),
}
