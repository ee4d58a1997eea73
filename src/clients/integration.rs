use anyhow::{Error, Result};
use async_trait::async_trait;

use crate::models::integration::{ConnectionTestResult, IntegrationConfig};

/// Source of the persisted WhatsApp integration settings.
#[async_trait]
pub trait IntegrationStore: Send + Sync {
    async fn fetch(&self) -> Result<Option<IntegrationConfig>, Error>;

    async fn record_test_result(&self, result: &ConnectionTestResult) -> Result<(), Error>;
}
