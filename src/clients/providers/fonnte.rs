use async_trait::async_trait;
use tracing::debug;

use super::{ProviderAdapter, send_once, status_flag_true, status_once};
use crate::{
    clients::http::HttpExecutor,
    models::{
        integration::{IntegrationConfig, ProviderKind},
        phone::COUNTRY_CODE,
        probe::RequestSpec,
        response::{SendResult, StatusReport},
    },
};

/// Fonnte: raw key in `Authorization`, form-encoded send.
pub struct FonnteClient {
    config: IntegrationConfig,
    executor: HttpExecutor,
}

impl FonnteClient {
    pub fn new(config: IntegrationConfig, executor: HttpExecutor) -> Self {
        Self { config, executor }
    }

    pub(crate) fn send_request(config: &IntegrationConfig, phone: &str, message: &str) -> RequestSpec {
        RequestSpec::post("fonnte-send", format!("{}/send", config.base_url()))
            .header("Authorization", &config.api_key)
            .form(&[
                ("target", phone),
                ("message", message),
                ("countryCode", COUNTRY_CODE),
            ])
    }

    pub(crate) async fn send_with(
        config: &IntegrationConfig,
        executor: &HttpExecutor,
        provider: ProviderKind,
        phone: &str,
        message: &str,
    ) -> SendResult {
        debug!(provider = %provider, phone, "Sending WhatsApp message");

        let spec = Self::send_request(config, phone, message);
        send_once(executor, provider, &spec, status_flag_true, "reason").await
    }
}

#[async_trait]
impl ProviderAdapter for FonnteClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Fonnte
    }

    async fn send(&self, phone: &str, message: &str) -> SendResult {
        Self::send_with(&self.config, &self.executor, ProviderKind::Fonnte, phone, message).await
    }

    async fn check_status(&self) -> StatusReport {
        let spec = RequestSpec::post("fonnte-device", format!("{}/device", self.config.base_url()))
            .header("Authorization", &self.config.api_key);

        status_once(&self.executor, ProviderKind::Fonnte, &spec, status_flag_true, "reason").await
    }
}
