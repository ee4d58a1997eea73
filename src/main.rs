use std::sync::Arc;

use anyhow::{Error, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wa_gateway::{
    api::run_api_server,
    clients::{database::DatabaseClient, integration::IntegrationStore, template::seed_defaults},
    config::Config,
    gateway::NotificationGateway,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;

    let database = DatabaseClient::connect(&config.database_url).await?;
    database.migrate().await?;

    let seeded = seed_defaults(&database).await?;
    if seeded > 0 {
        info!(seeded, "Seeded default WhatsApp templates");
    }

    let integration = match database.fetch().await {
        Ok(integration) => integration,
        Err(e) => {
            warn!(error = %e, "Failed to load WhatsApp integration settings");
            None
        }
    };
    match &integration {
        Some(settings) => info!(
            provider = %settings.provider,
            enabled = settings.enabled,
            "Loaded WhatsApp integration settings"
        ),
        None => warn!("No WhatsApp integration configured, sends will be rejected"),
    }

    let gateway = NotificationGateway::new(
        integration,
        &config.gateway_settings(),
        Arc::new(database.clone()),
    )?;

    run_api_server(&config, Arc::new(gateway), database).await
}
