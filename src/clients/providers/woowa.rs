use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::{ProviderAdapter, connected_flag_true, send_once, status_once, success_flag_true};
use crate::{
    clients::http::HttpExecutor,
    models::{
        integration::{IntegrationConfig, ProviderKind},
        probe::RequestSpec,
        response::{SendResult, StatusReport},
    },
};

/// Woowa reports `success` on send and `connected` on status.
pub struct WoowaClient {
    config: IntegrationConfig,
    executor: HttpExecutor,
}

impl WoowaClient {
    pub fn new(config: IntegrationConfig, executor: HttpExecutor) -> Self {
        Self { config, executor }
    }
}

#[async_trait]
impl ProviderAdapter for WoowaClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Woowa
    }

    async fn send(&self, phone: &str, message: &str) -> SendResult {
        debug!(provider = "woowa", phone, "Sending WhatsApp message");

        let spec = RequestSpec::post("woowa-send", format!("{}/send", self.config.base_url()))
            .header("Authorization", &self.config.api_key)
            .json(json!({ "phone": phone, "message": message }));

        send_once(&self.executor, ProviderKind::Woowa, &spec, success_flag_true, "message").await
    }

    async fn check_status(&self) -> StatusReport {
        let spec = RequestSpec::get("woowa-status", format!("{}/status", self.config.base_url()))
            .header("Authorization", &self.config.api_key);

        status_once(&self.executor, ProviderKind::Woowa, &spec, connected_flag_true, "message").await
    }
}
