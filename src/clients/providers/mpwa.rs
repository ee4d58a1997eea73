use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use super::ProviderAdapter;
use crate::{
    clients::{http::HttpExecutor, probe::ProbingDispatcher},
    models::{
        integration::{IntegrationConfig, ProviderKind},
        probe::RequestSpec,
        response::{SendResult, StatusReport},
    },
};

const SEND_PATH: &str = "/send-message";

/// MPWA installations disagree on endpoint, auth placement and encoding, so
/// both operations are driven through the probing dispatcher.
pub struct MpwaClient {
    config: IntegrationConfig,
    executor: HttpExecutor,
}

impl MpwaClient {
    pub fn new(config: IntegrationConfig, executor: HttpExecutor) -> Self {
        Self { config, executor }
    }

    /// Ordered send variants: documented shapes first, legacy shapes last.
    ///
    /// A base URL that already ends in the send endpoint is used as is. When
    /// no sender is configured the variants carrying one are left out.
    pub fn send_variants(config: &IntegrationConfig, phone: &str, message: &str) -> Vec<RequestSpec> {
        let base = config.base_url();
        let key = config.api_key.as_str();
        let sender = config.sender();

        let with_sender = sender.map(|sender| {
            vec![
                ("api_key", key),
                ("sender", sender),
                ("number", phone),
                ("message", message),
            ]
        });
        let without_sender = vec![("api_key", key), ("number", phone), ("message", message)];

        if base.contains(SEND_PATH) {
            let fields = with_sender.unwrap_or(without_sender);
            let url = base.to_string();

            return vec![
                RequestSpec::post("direct-json", url.clone()).json(json_object(&fields)),
                RequestSpec::get("direct-query", url.clone()).query(&fields),
                RequestSpec::post("direct-form", url).form(&fields),
            ];
        }

        let url = format!("{}{}", base, SEND_PATH);
        let mut variants = Vec::new();

        if let Some(fields) = &with_sender {
            variants.push(RequestSpec::post("json-with-sender", url.clone()).json(json_object(fields)));
            variants.push(RequestSpec::get("query-with-sender", url.clone()).query(fields));
        }

        variants.push(
            RequestSpec::post("json-without-sender", url.clone()).json(json_object(&without_sender)),
        );
        variants.push(RequestSpec::get("query-without-sender", url.clone()).query(&without_sender));

        if let Some(fields) = &with_sender {
            variants.push(RequestSpec::post("form-with-sender", url.clone()).form(fields));
        }

        let legacy = [("phone", phone), ("message", message)];
        variants.push(
            RequestSpec::post("legacy-bearer", format!("{}/send", base))
                .bearer(key)
                .json(json_object(&legacy)),
        );
        variants.push(
            RequestSpec::post("legacy-apikey", format!("{}/api/send-message", base))
                .header("apikey", key)
                .json(json_object(&legacy)),
        );

        variants
    }

    pub fn status_variants(config: &IntegrationConfig) -> Vec<RequestSpec> {
        let base = config.base_url();
        let key = config.api_key.as_str();

        let bearer = ["/status", "/api/status", "/device/status"]
            .into_iter()
            .map(|path| RequestSpec::get("status-bearer", format!("{}{}", base, path)).bearer(key));
        let api_key = ["/status", "/api/status"]
            .into_iter()
            .map(|path| RequestSpec::get("status-apikey", format!("{}{}", base, path)).header("apikey", key));

        bearer.chain(api_key).collect()
    }
}

fn json_object(fields: &[(&str, &str)]) -> JsonValue {
    let map: Map<String, JsonValue> = fields
        .iter()
        .map(|(k, v)| (k.to_string(), JsonValue::String(v.to_string())))
        .collect();

    JsonValue::Object(map)
}

#[async_trait]
impl ProviderAdapter for MpwaClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Mpwa
    }

    async fn send(&self, phone: &str, message: &str) -> SendResult {
        let variants = Self::send_variants(&self.config, phone, message);
        debug!(
            provider = "mpwa",
            phone,
            sender = self.config.sender().unwrap_or("-"),
            variants = variants.len(),
            "Probing MPWA send variants"
        );

        ProbingDispatcher::new(&self.executor, ProviderKind::Mpwa)
            .send(&variants)
            .await
    }

    async fn check_status(&self) -> StatusReport {
        let variants = Self::status_variants(&self.config);

        ProbingDispatcher::new(&self.executor, ProviderKind::Mpwa)
            .check_status(&variants)
            .await
    }
}
