use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::response::StatusReport;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ServiceHealth {
    pub status: HealthStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    pub fn healthy(response_time_ms: u64) -> Self {
        Self {
            status: HealthStatus::Healthy,
            response_time_ms: Some(response_time_ms),
            error: None,
        }
    }

    pub fn unhealthy(error: String) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            response_time_ms: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthCheckResponse {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub whatsapp: StatusReport,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<ServiceHealth>,
}

impl HealthCheckResponse {
    /// Healthy only when WhatsApp is connected and the database, if one is
    /// attached, answers.
    pub fn new(whatsapp: StatusReport, database: Option<ServiceHealth>) -> Self {
        let database_ok = database
            .as_ref()
            .is_none_or(|db| db.status == HealthStatus::Healthy);

        let status = if whatsapp.connected && database_ok {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        Self {
            status,
            timestamp: Utc::now(),
            whatsapp,
            database,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_outage_makes_service_unhealthy() {
        let connected = StatusReport::connected(None, None);

        let ok = HealthCheckResponse::new(connected.clone(), Some(ServiceHealth::healthy(3)));
        assert_eq!(ok.status, HealthStatus::Healthy);

        let down = HealthCheckResponse::new(
            connected.clone(),
            Some(ServiceHealth::unhealthy("connection closed".to_string())),
        );
        assert_eq!(down.status, HealthStatus::Unhealthy);

        assert_eq!(HealthCheckResponse::new(connected, None).status, HealthStatus::Healthy);
    }

    #[test]
    fn disconnected_whatsapp_makes_service_unhealthy() {
        let report = HealthCheckResponse::new(
            StatusReport::disconnected("Device not connected"),
            Some(ServiceHealth::healthy(1)),
        );

        assert_eq!(report.status, HealthStatus::Unhealthy);
    }
}
