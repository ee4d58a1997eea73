use thiserror::Error;

/// Failure taxonomy of the gateway. None of these escape the gateway as an
/// `Err`; they are rendered into a failed `SendResult` or `StatusReport`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("WhatsApp integration is not configured or disabled")]
    NotConfigured,

    #[error("{provider} API URL or API key is not configured ({missing} missing)")]
    MissingCredentials {
        provider: String,
        missing: &'static str,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Protocol mismatch: {0}")]
    ProtocolMismatch(String),

    #[error("Unsupported WhatsApp provider: {0}")]
    UnsupportedProvider(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Transport(format!("request timed out: {}", err))
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}
