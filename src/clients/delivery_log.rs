use anyhow::{Error, Result};
use async_trait::async_trait;

use crate::models::audit::{CreateDeliveryLog, DeliveryLogEntry};

/// Append-only record of notification send attempts.
#[async_trait]
pub trait DeliveryLog: Send + Sync {
    async fn append(&self, log: &CreateDeliveryLog) -> Result<DeliveryLogEntry, Error>;

    /// Newest entries first.
    async fn recent(&self, limit: usize) -> Result<Vec<DeliveryLogEntry>, Error>;
}
