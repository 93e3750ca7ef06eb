//! Integration registry types.

use super::IntegrationId;

/// A pluggable external handler. The registry is read-only from the core's
/// perspective; rows are provisioned out of band.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Integration {
    pub id: IntegrationId,
    pub name: String,
    pub function_name: String,
}
