use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use serde_json::Value;
use tokio::net::TcpListener;
use wa_gateway::{
    api::router,
    clients::memory::MemoryDeliveryLog,
    gateway::NotificationGateway,
    models::integration::IntegrationConfig,
};

use crate::common::{API_KEY, gateway};

async fn serve(gateway: NotificationGateway) -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = router(Arc::new(gateway), None);

    tokio::spawn(async move { axum::serve(listener, app).await });

    Ok(addr)
}

/// Test: Health is unavailable while WhatsApp is not configured
#[tokio::test]
async fn test_health_unavailable_without_integration() -> Result<()> {
    let log = MemoryDeliveryLog::new();
    let addr = serve(gateway(None, &log)?).await?;

    let response = reqwest::get(format!("http://{}/health", addr)).await?;

    assert_eq!(response.status().as_u16(), 503);

    let body: Value = response.json().await?;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["whatsapp"]["connected"], Value::Bool(false));
    assert_eq!(
        body["whatsapp"]["message"],
        "WhatsApp integration is not configured or disabled"
    );
    assert!(body.get("database").is_none());

    Ok(())
}

/// Test: Health is OK when the backend reports a connection
#[tokio::test]
async fn test_health_ok_when_connected() -> Result<()> {
    let log = MemoryDeliveryLog::new();
    let addr = serve(gateway(
        Some(IntegrationConfig::new("custom", "http://127.0.0.1:9", API_KEY)),
        &log,
    )?)
    .await?;

    let response = reqwest::get(format!("http://{}/health", addr)).await?;

    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await?;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["whatsapp"]["connected"], Value::Bool(true));

    Ok(())
}
