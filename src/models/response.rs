use serde::Serialize;
use serde_json::Value as JsonValue;

pub const DEFAULT_SENT_MESSAGE: &str = "Message sent successfully";

/// Outcome of one send attempt.
///
/// A successful result always carries a provider message and a failed one
/// always carries an error detail; the constructors are the only way to
/// build one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendResult {
    success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    provider_message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    raw_response: Option<JsonValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    error_detail: Option<String>,
}

impl SendResult {
    pub fn sent(provider_message: Option<String>, raw_response: Option<JsonValue>) -> Self {
        Self {
            success: true,
            provider_message: Some(
                provider_message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_SENT_MESSAGE.to_string()),
            ),
            raw_response,
            error_detail: None,
        }
    }

    pub fn failed(error_detail: impl Into<String>, raw_response: Option<JsonValue>) -> Self {
        Self {
            success: false,
            provider_message: None,
            raw_response,
            error_detail: Some(error_detail.into()),
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn provider_message(&self) -> Option<&str> {
        self.provider_message.as_deref()
    }

    pub fn raw_response(&self) -> Option<&JsonValue> {
        self.raw_response.as_ref()
    }

    pub fn error_detail(&self) -> Option<&str> {
        self.error_detail.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub connected: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<JsonValue>,
}

impl StatusReport {
    pub fn connected(device: Option<String>, raw_response: Option<JsonValue>) -> Self {
        Self {
            connected: true,
            device,
            message: None,
            raw_response,
        }
    }

    pub fn disconnected(message: impl Into<String>) -> Self {
        Self {
            connected: false,
            device: None,
            message: Some(message.into()),
            raw_response: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_raw_response(mut self, raw_response: JsonValue) -> Self {
        self.raw_response = Some(raw_response);
        self
    }
}
