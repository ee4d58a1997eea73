use async_trait::async_trait;

use super::{FonnteClient, ProviderAdapter};
use crate::{
    clients::http::HttpExecutor,
    models::{
        integration::{IntegrationConfig, ProviderKind},
        response::{SendResult, StatusReport},
    },
};

/// Generic fallback for self-hosted gateways that speak the Fonnte shape.
///
/// There is no status endpoint to ask, so a configured API key is taken as
/// "connected".
pub struct CustomClient {
    config: IntegrationConfig,
    executor: HttpExecutor,
}

impl CustomClient {
    pub fn new(config: IntegrationConfig, executor: HttpExecutor) -> Self {
        Self { config, executor }
    }
}

#[async_trait]
impl ProviderAdapter for CustomClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Custom
    }

    async fn send(&self, phone: &str, message: &str) -> SendResult {
        FonnteClient::send_with(&self.config, &self.executor, ProviderKind::Custom, phone, message)
            .await
    }

    async fn check_status(&self) -> StatusReport {
        if self.config.has_api_key() {
            StatusReport::connected(None, None).with_message("Custom API configured")
        } else {
            StatusReport::disconnected("API key not set")
        }
    }
}
