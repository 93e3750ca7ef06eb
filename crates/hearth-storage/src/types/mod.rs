//! Type definitions for hearth storage.

mod faces;
mod groups;
mod ids;
mod integrations;
mod memberships;

// Re-export all types from submodules
pub use faces::*;
pub use groups::*;
pub use ids::*;
pub use integrations::*;
pub use memberships::*;
