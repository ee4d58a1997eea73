use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use reqwest::Client;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::{
    clients::signal,
    error::GatewayError,
    models::probe::{HttpMethod, RequestBody, RequestSpec},
};

const SNIPPET_LEN: usize = 500;

/// Reply from a backend, kept whole so each adapter can interpret it.
#[derive(Debug, Clone)]
pub struct ProviderReply {
    pub status: u16,
    pub body: String,
    json: Option<JsonValue>,
}

impl ProviderReply {
    pub fn new(status: u16, body: String) -> Self {
        let json = serde_json::from_str::<JsonValue>(&body)
            .ok()
            .filter(JsonValue::is_object);

        Self { status, body, json }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The reply as a JSON object, if it is one.
    pub fn json(&self) -> Option<&JsonValue> {
        self.json.as_ref()
    }

    pub fn is_markup(&self) -> bool {
        signal::looks_like_markup(&self.body)
    }

    pub fn snippet(&self) -> &str {
        match self.body.char_indices().nth(SNIPPET_LEN) {
            Some((end, _)) => &self.body[..end],
            None => &self.body,
        }
    }

    /// Describes a reply that carried no JSON object.
    pub fn mismatch(&self) -> GatewayError {
        if self.is_markup() {
            GatewayError::ProtocolMismatch(format!(
                "backend returned an HTML page (HTTP {}), check the API URL",
                self.status
            ))
        } else {
            GatewayError::ProtocolMismatch(format!(
                "backend returned a non-JSON reply (HTTP {}): {}",
                self.status,
                self.snippet()
            ))
        }
    }
}

/// Executes `RequestSpec`s with one shared, timeout-bounded client.
#[derive(Clone)]
pub struct HttpExecutor {
    http_client: Client,
}

impl HttpExecutor {
    pub fn new(connect_timeout: Duration, request_timeout: Duration) -> Result<Self, Error> {
        let http_client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { http_client })
    }

    pub async fn execute(&self, spec: &RequestSpec) -> Result<ProviderReply, GatewayError> {
        debug!(
            label = spec.label,
            method = %spec.method,
            url = %spec.url,
            "Dispatching provider request"
        );

        let mut request = match spec.method {
            HttpMethod::Get => self.http_client.get(&spec.url),
            HttpMethod::Post => self.http_client.post(&spec.url),
        };

        for (name, value) in &spec.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }

        request = match &spec.body {
            RequestBody::Empty => request,
            RequestBody::Json(body) => request.json(body),
            RequestBody::Form(fields) => request.form(fields),
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(label = spec.label, status, "Provider replied");

        Ok(ProviderReply::new(status, body))
    }
}
