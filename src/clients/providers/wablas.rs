use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::{ProviderAdapter, send_once, status_flag_true, status_once};
use crate::{
    clients::http::HttpExecutor,
    models::{
        integration::{IntegrationConfig, ProviderKind},
        probe::RequestSpec,
        response::{SendResult, StatusReport},
    },
};

pub struct WablasClient {
    config: IntegrationConfig,
    executor: HttpExecutor,
}

impl WablasClient {
    pub fn new(config: IntegrationConfig, executor: HttpExecutor) -> Self {
        Self { config, executor }
    }
}

#[async_trait]
impl ProviderAdapter for WablasClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Wablas
    }

    async fn send(&self, phone: &str, message: &str) -> SendResult {
        debug!(provider = "wablas", phone, "Sending WhatsApp message");

        let spec = RequestSpec::post(
            "wablas-send",
            format!("{}/send-message", self.config.base_url()),
        )
        .header("Authorization", &self.config.api_key)
        .json(json!({ "phone": phone, "message": message }));

        send_once(&self.executor, ProviderKind::Wablas, &spec, status_flag_true, "message").await
    }

    async fn check_status(&self) -> StatusReport {
        let spec = RequestSpec::get(
            "wablas-device-info",
            format!("{}/device/info", self.config.base_url()),
        )
        .header("Authorization", &self.config.api_key);

        status_once(&self.executor, ProviderKind::Wablas, &spec, status_flag_true, "message").await
    }
}
