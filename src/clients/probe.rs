use serde_json::Value as JsonValue;
use tracing::{debug, error, info, warn};

use crate::{
    clients::{http::HttpExecutor, signal},
    models::{
        integration::ProviderKind,
        probe::RequestSpec,
        response::{SendResult, StatusReport},
    },
};

/// Running count of why variants were rejected.
#[derive(Debug, Default)]
struct ProbeTally {
    transport: usize,
    markup: usize,
    negative: usize,
    unexpected: usize,
    last_negative: Option<JsonValue>,
}

impl ProbeTally {
    fn summary(&self, attempted: usize) -> String {
        format!(
            "All {} request variants were rejected ({} transport errors, {} markup pages, {} negative responses, {} unexpected responses)",
            attempted, self.transport, self.markup, self.negative, self.unexpected
        )
    }
}

/// Tries an ordered list of request variants for one logical operation and
/// stops at the first one the backend accepts.
///
/// Variants run one after another, never concurrently, so at most one of
/// them can deliver the message. The order is whatever the caller passes;
/// nothing is reordered between calls.
pub struct ProbingDispatcher<'a> {
    executor: &'a HttpExecutor,
    provider: ProviderKind,
}

impl<'a> ProbingDispatcher<'a> {
    pub fn new(executor: &'a HttpExecutor, provider: ProviderKind) -> Self {
        Self { executor, provider }
    }

    pub async fn send(&self, variants: &[RequestSpec]) -> SendResult {
        let mut tally = ProbeTally::default();

        for (index, variant) in variants.iter().enumerate() {
            let reply = match self.executor.execute(variant).await {
                Ok(reply) => reply,
                Err(e) => {
                    warn!(
                        provider = %self.provider,
                        variant = variant.label,
                        attempt = index + 1,
                        error = %e,
                        "Request variant failed in transport"
                    );
                    tally.transport += 1;
                    continue;
                }
            };

            match reply.json() {
                Some(json) if reply.is_success() && signal::send_accepted(json) => {
                    info!(
                        provider = %self.provider,
                        variant = variant.label,
                        method = %variant.method,
                        attempt = index + 1,
                        "WhatsApp message accepted"
                    );
                    return SendResult::sent(
                        signal::first_text(json, &["msg", "message"]),
                        Some(json.clone()),
                    );
                }
                Some(json) => {
                    warn!(
                        provider = %self.provider,
                        variant = variant.label,
                        status = reply.status,
                        response = %json,
                        "Variant returned JSON without a success signal"
                    );
                    tally.negative += 1;
                    tally.last_negative = Some(json.clone());
                }
                None if reply.is_markup() => {
                    warn!(
                        provider = %self.provider,
                        variant = variant.label,
                        status = reply.status,
                        "Variant returned an HTML page"
                    );
                    tally.markup += 1;
                }
                None => {
                    warn!(
                        provider = %self.provider,
                        variant = variant.label,
                        status = reply.status,
                        body = reply.snippet(),
                        "Variant returned an unexpected response"
                    );
                    tally.unexpected += 1;
                }
            }
        }

        let detail = tally.summary(variants.len());
        error!(provider = %self.provider, detail = %detail, "All request variants failed");

        SendResult::failed(detail, tally.last_negative)
    }

    /// Unlike `send`, the first well-formed reply ends the probe whether it
    /// reports the device as connected or not.
    pub async fn check_status(&self, variants: &[RequestSpec]) -> StatusReport {
        for variant in variants {
            let reply = match self.executor.execute(variant).await {
                Ok(reply) => reply,
                Err(e) => {
                    warn!(
                        provider = %self.provider,
                        variant = variant.label,
                        error = %e,
                        "Status variant failed in transport"
                    );
                    continue;
                }
            };

            let Some(json) = reply.json().filter(|_| reply.is_success()) else {
                debug!(
                    provider = %self.provider,
                    variant = variant.label,
                    status = reply.status,
                    markup = reply.is_markup(),
                    "Status variant gave no usable reply"
                );
                continue;
            };

            if signal::device_connected(json) {
                return StatusReport::connected(signal::device_label(json), Some(json.clone()));
            }

            let message = signal::first_text(json, &["message", "error"])
                .unwrap_or_else(|| "Device not connected".to_string());
            return StatusReport::disconnected(message).with_raw_response(json.clone());
        }

        StatusReport::disconnected(format!(
            "Unable to check {} status. Please verify API URL and credentials.",
            self.provider.as_str().to_uppercase()
        ))
    }
}
