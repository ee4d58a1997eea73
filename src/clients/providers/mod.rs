mod custom;
mod fonnte;
mod mpwa;
mod wablas;
mod woowa;

use async_trait::async_trait;
pub use custom::CustomClient;
pub use fonnte::FonnteClient;
pub use mpwa::MpwaClient;
use serde_json::Value as JsonValue;
use tracing::{error, info, warn};
pub use wablas::WablasClient;
pub use woowa::WoowaClient;

use crate::{
    clients::{http::HttpExecutor, signal},
    models::{
        integration::{IntegrationConfig, ProviderKind},
        probe::RequestSpec,
        response::{SendResult, StatusReport},
    },
};

/// One WhatsApp backend's wire format behind the gateway's two operations.
///
/// Implementations never fail with `Err`: every transport or protocol
/// problem comes back as a failed `SendResult` or a disconnected
/// `StatusReport`.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// `phone` is already normalized.
    async fn send(&self, phone: &str, message: &str) -> SendResult;

    async fn check_status(&self) -> StatusReport;
}

/// The only place provider kinds are mapped to adapters.
pub fn adapter_for(
    kind: ProviderKind,
    config: &IntegrationConfig,
    executor: &HttpExecutor,
) -> Box<dyn ProviderAdapter> {
    let config = config.clone();
    let executor = executor.clone();

    match kind {
        ProviderKind::Fonnte => Box::new(FonnteClient::new(config, executor)),
        ProviderKind::Wablas => Box::new(WablasClient::new(config, executor)),
        ProviderKind::Woowa => Box::new(WoowaClient::new(config, executor)),
        ProviderKind::Mpwa => Box::new(MpwaClient::new(config, executor)),
        ProviderKind::Custom => Box::new(CustomClient::new(config, executor)),
    }
}

/// Sends with a backend that has a single documented request shape.
///
/// `accepted` decides success on a 2xx JSON reply; `failure_field` names the
/// field carrying the backend's explanation when it refuses.
pub(crate) async fn send_once(
    executor: &HttpExecutor,
    provider: ProviderKind,
    spec: &RequestSpec,
    accepted: fn(&JsonValue) -> bool,
    failure_field: &str,
) -> SendResult {
    let reply = match executor.execute(spec).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(provider = %provider, error = %e, "WhatsApp send failed in transport");
            return SendResult::failed(e.to_string(), None);
        }
    };

    match reply.json() {
        Some(json) if reply.is_success() && accepted(json) => {
            info!(provider = %provider, "WhatsApp message sent");
            SendResult::sent(None, Some(json.clone()))
        }
        Some(json) => {
            error!(
                provider = %provider,
                status = reply.status,
                response = %json,
                "WhatsApp send refused by provider"
            );
            let reason = signal::first_text(json, &[failure_field])
                .unwrap_or_else(|| "Failed to send message".to_string());
            SendResult::failed(reason, Some(json.clone()))
        }
        None => {
            let mismatch = reply.mismatch();
            error!(provider = %provider, error = %mismatch, "WhatsApp send got no JSON reply");
            SendResult::failed(mismatch.to_string(), None)
        }
    }
}

/// Status counterpart of `send_once`.
pub(crate) async fn status_once(
    executor: &HttpExecutor,
    provider: ProviderKind,
    spec: &RequestSpec,
    connected: fn(&JsonValue) -> bool,
    failure_field: &str,
) -> StatusReport {
    let reply = match executor.execute(spec).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(provider = %provider, error = %e, "Status check failed in transport");
            return StatusReport::disconnected(e.to_string());
        }
    };

    match reply.json() {
        Some(json) if reply.is_success() && connected(json) => {
            StatusReport::connected(signal::device_label(json), Some(json.clone()))
        }
        Some(json) => {
            let reason = signal::first_text(json, &[failure_field])
                .unwrap_or_else(|| "Device not connected".to_string());
            StatusReport::disconnected(reason).with_raw_response(json.clone())
        }
        None => StatusReport::disconnected(reply.mismatch().to_string()),
    }
}

pub(crate) fn status_flag_true(json: &JsonValue) -> bool {
    signal::flag(json, "status") == Some(true)
}

pub(crate) fn success_flag_true(json: &JsonValue) -> bool {
    signal::flag(json, "success") == Some(true)
}

pub(crate) fn connected_flag_true(json: &JsonValue) -> bool {
    signal::flag(json, "connected") == Some(true)
}
