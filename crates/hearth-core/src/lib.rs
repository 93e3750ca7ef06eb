//! Device-group membership and face-identity resolution.
//!
//! A device group is a set of users sharing physical devices (a household).
//! This crate owns the group lifecycle, admission by device-key possession,
//! face enrollment, and the resolution of a face image to a member plus a
//! federated credential. Storage, recognition, and identity are injected
//! behind the traits in `hearth-storage`, `hearth-recognition`, and
//! `hearth-identity`.

mod config;
mod credentials;
mod error;
mod faces;
mod groups;
mod integrations;
mod resolve;
mod service;

pub use config::{ConfigError, ServiceConfig};
pub use error::{Error, Result};
pub use service::{DeviceGroupService, FaceAuth, Member, Resolution};
