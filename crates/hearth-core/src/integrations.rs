//! Integration registry reads.

use hearth_storage::{Integration, IntegrationId, StoreError};

use crate::error::{Error, Result};
use crate::service::DeviceGroupService;

impl DeviceGroupService {
    /// The integrations available to devices. The registry is global and
    /// read-only; rows are provisioned out of band.
    pub async fn list_integrations(&self) -> Result<Vec<Integration>> {
        self.store
            .list_integrations()
            .await
            .map_err(|e| Error::Store(e.to_string()))
    }

    pub async fn get_integration(&self, id: &IntegrationId) -> Result<Integration> {
        self.store.get_integration(id).await.map_err(|e| match e {
            StoreError::NotFound => Error::IntegrationNotFound,
            e => Error::Store(e.to_string()),
        })
    }
}
