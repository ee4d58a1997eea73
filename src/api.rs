use std::{sync::Arc, time::Instant};

use anyhow::{Error, Result};
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::{
    clients::database::DatabaseClient,
    config::Config,
    gateway::NotificationGateway,
    models::health::{HealthCheckResponse, HealthStatus, ServiceHealth},
};

pub struct AppState {
    gateway: Arc<NotificationGateway>,
    database: Option<DatabaseClient>,
}

pub fn router(gateway: Arc<NotificationGateway>, database: Option<DatabaseClient>) -> Router {
    let state = Arc::new(AppState { gateway, database });

    Router::new()
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_api_server(
    config: &Config,
    gateway: Arc<NotificationGateway>,
    database: DatabaseClient,
) -> Result<(), Error> {
    let app = router(gateway, Some(database));

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = TcpListener::bind(&addr).await?;

    info!(address = %addr, "Health check server started");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn check_database(database: &DatabaseClient) -> ServiceHealth {
    let start = Instant::now();

    match database.health_check().await {
        Ok(()) => {
            let elapsed = start.elapsed().as_millis() as u64;
            debug!(response_time_ms = elapsed, "Database health check passed");
            ServiceHealth::healthy(elapsed)
        }
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            ServiceHealth::unhealthy(e.to_string())
        }
    }
}

async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let whatsapp = state.gateway.check_status().await;

    let database = match &state.database {
        Some(database) => Some(check_database(database).await),
        None => None,
    };

    let health = HealthCheckResponse::new(whatsapp, database);

    let status_code = match health.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}
