use std::{sync::Arc, time::Duration};

use anyhow::Result;
use chrono::NaiveDate;
use wa_gateway::{
    clients::memory::MemoryDeliveryLog,
    gateway::{GatewaySettings, NotificationGateway},
    models::{
        integration::IntegrationConfig,
        notification::{Customer, Invoice},
        retry::RetryConfig,
    },
};

pub const APP_NAME: &str = "NetLink";
pub const API_KEY: &str = "secret-key";

pub fn settings() -> GatewaySettings {
    GatewaySettings {
        connect_timeout: Duration::from_secs(1),
        request_timeout: Duration::from_secs(2),
        app_name: APP_NAME.to_string(),
        log_retry: RetryConfig {
            max_attempts: 2,
            initial_delay_ms: 1,
            max_delay_ms: 5,
            backoff_multiplier: 2,
        },
    }
}

pub fn gateway(config: Option<IntegrationConfig>, log: &MemoryDeliveryLog) -> Result<NotificationGateway> {
    gateway_with(config, log, settings())
}

pub fn gateway_with(
    config: Option<IntegrationConfig>,
    log: &MemoryDeliveryLog,
    settings: GatewaySettings,
) -> Result<NotificationGateway> {
    NotificationGateway::new(config, &settings, Arc::new(log.clone()))
}

pub fn customer() -> Customer {
    Customer {
        id: 7,
        name: "Budi".to_string(),
        phone: "0812-3456-7890".to_string(),
    }
}

pub fn invoice() -> Invoice {
    Invoice {
        id: 42,
        number: "INV-2025-0042".to_string(),
        package_name: "Home 20 Mbps".to_string(),
        amount: 150000,
        due_date: NaiveDate::from_ymd_opt(2025, 3, 10),
        paid_date: None,
    }
}
