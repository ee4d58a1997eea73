use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::GatewayError;

/// Messaging backends the gateway knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Fonnte,
    Wablas,
    Woowa,
    Mpwa,
    Custom,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Fonnte => "fonnte",
            ProviderKind::Wablas => "wablas",
            ProviderKind::Woowa => "woowa",
            ProviderKind::Mpwa => "mpwa",
            ProviderKind::Custom => "custom",
        }
    }
}

impl Display for ProviderKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fonnte" => Ok(ProviderKind::Fonnte),
            "wablas" => Ok(ProviderKind::Wablas),
            "woowa" => Ok(ProviderKind::Woowa),
            "mpwa" => Ok(ProviderKind::Mpwa),
            "custom" => Ok(ProviderKind::Custom),
            _ => Err(GatewayError::UnsupportedProvider(s.to_string())),
        }
    }
}

/// Reads a value that a half-filled settings row may store as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read-only snapshot of the WhatsApp integration settings.
///
/// `provider` keeps the raw name from the store so that an unknown backend
/// is reported by name when a send is attempted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub provider: String,

    #[serde(rename = "api_url", default, deserialize_with = "null_as_default")]
    pub api_base_url: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub api_key: String,

    #[serde(default)]
    pub sender: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
}

impl IntegrationConfig {
    pub fn new(provider: &str, api_base_url: &str, api_key: &str) -> Self {
        Self {
            provider: provider.to_string(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            sender: None,
            enabled: true,
        }
    }

    pub fn with_sender(mut self, sender: &str) -> Self {
        self.sender = Some(sender.to_string());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn provider_kind(&self) -> Result<ProviderKind, GatewayError> {
        self.provider.parse()
    }

    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    /// Sender number, treating a blank value as absent.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Fails fast when a credential needed for any network call is absent.
    pub fn ensure_credentials(&self) -> Result<(), GatewayError> {
        let missing = if self.base_url().trim().is_empty() {
            Some("API URL")
        } else if !self.has_api_key() {
            Some("API key")
        } else {
            None
        };

        match missing {
            Some(missing) => Err(GatewayError::MissingCredentials {
                provider: self.provider.clone(),
                missing,
            }),
            None => Ok(()),
        }
    }
}

/// Outcome of a connectivity test, written back to the integration store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionTestResult {
    pub success: bool,
    pub message: String,
    pub tested_at: DateTime<Utc>,
}

/// Ephemeral settings submitted from the settings screen to test a backend
/// before (or without) saving it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestConnectionRequest {
    pub provider: String,
    pub api_url: String,
    pub api_key: String,

    #[serde(default)]
    pub sender: Option<String>,

    pub test_number: String,
}

impl TestConnectionRequest {
    pub fn to_config(&self) -> IntegrationConfig {
        IntegrationConfig {
            sender: self.sender.clone(),
            ..IntegrationConfig::new(&self.provider, &self.api_url, &self.api_key)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_settings_row_deserializes() {
        let config: IntegrationConfig = serde_json::from_value(json!({})).unwrap();

        assert_eq!(config.provider, "");
        assert_eq!(config.api_key, "");
        assert!(!config.enabled);
        assert_eq!(
            config.provider_kind(),
            Err(GatewayError::UnsupportedProvider(String::new()))
        );
    }

    #[test]
    fn null_fields_read_as_blank() {
        let config: IntegrationConfig = serde_json::from_value(json!({
            "provider": "mpwa",
            "api_url": null,
            "api_key": null,
            "sender": null,
            "enabled": null,
            "admin_phone": "0811"
        }))
        .unwrap();

        assert_eq!(config.provider_kind(), Ok(ProviderKind::Mpwa));
        assert_eq!(config.sender(), None);
        assert_eq!(
            config.ensure_credentials(),
            Err(GatewayError::MissingCredentials {
                provider: "mpwa".to_string(),
                missing: "API URL",
            })
        );
    }
}
