use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use dotenvy::dotenv;
use serde::Deserialize;

use crate::{gateway::GatewaySettings, models::retry::RetryConfig};

fn default_app_name() -> String {
    "ISP Billing".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_connect_timeout_ms() -> u64 {
    5000
}

fn default_timeout_ms() -> u64 {
    10000
}

fn default_max_retry_attempts() -> u32 {
    3
}

fn default_initial_retry_delay_ms() -> u64 {
    100
}

fn default_max_retry_delay_ms() -> u64 {
    1000
}

fn default_retry_backoff_multiplier() -> u64 {
    2
}

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_server_port")]
    pub server_port: u16,

    /// Signature used in every message.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default = "default_connect_timeout_ms")]
    pub http_connect_timeout_ms: u64,
    #[serde(default = "default_timeout_ms")]
    pub http_timeout_ms: u64,

    #[serde(default = "default_max_retry_attempts")]
    pub max_retry_attempts: u32,
    #[serde(default = "default_initial_retry_delay_ms")]
    pub initial_retry_delay_ms: u64,
    #[serde(default = "default_max_retry_delay_ms")]
    pub max_retry_delay_ms: u64,
    #[serde(default = "default_retry_backoff_multiplier")]
    pub retry_backoff_multiplier: u64,
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        dotenv().ok();

        let config = envy::from_env::<Self>()
            .map_err(|e| anyhow!("Invalid or missing environmental variable: {}", e))?;
        Ok(config)
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.max_retry_attempts,
            initial_delay_ms: self.initial_retry_delay_ms,
            max_delay_ms: self.max_retry_delay_ms,
            backoff_multiplier: self.retry_backoff_multiplier,
        }
    }

    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            connect_timeout: Duration::from_millis(self.http_connect_timeout_ms),
            request_timeout: Duration::from_millis(self.http_timeout_ms),
            app_name: self.app_name.clone(),
            log_retry: self.retry_config(),
        }
    }
}
