use std::sync::Arc;

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tokio_postgres::{Client, NoTls, Row};
use tracing::{debug, error, info};

use crate::{
    clients::{delivery_log::DeliveryLog, integration::IntegrationStore, template::TemplateStore},
    models::{
        audit::{CreateDeliveryLog, DeliveryLogEntry},
        integration::{ConnectionTestResult, IntegrationConfig},
        template::{CreateTemplate, MessageTemplate, TemplateType},
    },
};

const SCHEMA: &str = include_str!("../../migrations/0001_gateway.sql");
const INTEGRATION_TYPE: &str = "whatsapp";
const TEMPLATE_COLUMNS: &str = "id, name, type, subject, content, variables, is_default, is_active";
const LOG_COLUMNS: &str =
    "id, phone, type, customer_id, invoice_id, message, status, response, error_message, created_at";

/// PostgreSQL backing for the delivery log, the template store and the
/// integration settings.
#[derive(Clone)]
pub struct DatabaseClient {
    client: Arc<Client>,
}

impl DatabaseClient {
    pub async fn connect(database_url: &str) -> Result<Self, Error> {
        info!("Connecting to PostgreSQL database");

        let (client, connection) = tokio_postgres::connect(database_url, NoTls)
            .await
            .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "PostgreSQL connection closed with error");
            }
        });

        info!("PostgreSQL connection established");

        Ok(Self {
            client: Arc::new(client),
        })
    }

    pub async fn migrate(&self) -> Result<(), Error> {
        self.client
            .batch_execute(SCHEMA)
            .await
            .map_err(|e| anyhow!("Failed to apply schema: {}", e))?;

        debug!("Database schema is up to date");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), Error> {
        self.client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| anyhow!("Database health check failed: {}", e))?;

        Ok(())
    }
}

fn template_from_row(row: &Row) -> Result<MessageTemplate, Error> {
    let template_type: String = row.try_get("type")?;

    Ok(MessageTemplate {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        template_type: template_type.parse()?,
        subject: row.try_get("subject")?,
        body: row.try_get("content")?,
        variables: row.try_get("variables")?,
        is_default: row.try_get("is_default")?,
        is_active: row.try_get("is_active")?,
    })
}

fn log_from_row(row: &Row) -> Result<DeliveryLogEntry, Error> {
    let notification_type: String = row.try_get("type")?;
    let status: String = row.try_get("status")?;

    Ok(DeliveryLogEntry {
        id: row.try_get("id")?,
        recipient_phone: row.try_get("phone")?,
        notification_type: notification_type.parse()?,
        rendered_body: row.try_get("message")?,
        customer_id: row.try_get("customer_id")?,
        invoice_id: row.try_get("invoice_id")?,
        status: status.parse()?,
        raw_response: row.try_get("response")?,
        error_message: row.try_get("error_message")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl DeliveryLog for DatabaseClient {
    /// Rewriting a log whose first write did commit is a no-op.
    async fn append(&self, log: &CreateDeliveryLog) -> Result<DeliveryLogEntry, Error> {
        let entry = log.clone().into_entry();
        let notification_type = entry.notification_type.as_str();
        let status = entry.status.to_string();

        self.client
            .execute(
                "INSERT INTO whatsapp_logs (
                    id, phone, type, customer_id, invoice_id,
                    message, status, response, error_message, created_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                ON CONFLICT (id) DO NOTHING",
                &[
                    &entry.id,
                    &entry.recipient_phone,
                    &notification_type,
                    &entry.customer_id,
                    &entry.invoice_id,
                    &entry.rendered_body,
                    &status,
                    &entry.raw_response,
                    &entry.error_message,
                    &entry.created_at,
                ],
            )
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    phone = %entry.recipient_phone,
                    "Failed to write delivery log to database"
                );
                anyhow!("Database write failed: {}", e)
            })?;

        debug!(
            id = %entry.id,
            status = %status,
            "Delivery log written to database"
        );

        Ok(entry)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<DeliveryLogEntry>, Error> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = self
            .client
            .query(
                &format!(
                    "SELECT {} FROM whatsapp_logs ORDER BY created_at DESC LIMIT $1",
                    LOG_COLUMNS
                ),
                &[&limit],
            )
            .await?;

        rows.iter().map(log_from_row).collect()
    }
}

#[async_trait]
impl TemplateStore for DatabaseClient {
    async fn select_default(
        &self,
        template_type: TemplateType,
    ) -> Result<Option<MessageTemplate>, Error> {
        let row = self
            .client
            .query_opt(
                &format!(
                    "SELECT {} FROM whatsapp_templates
                     WHERE type = $1 AND is_active AND is_default
                     ORDER BY id LIMIT 1",
                    TEMPLATE_COLUMNS
                ),
                &[&template_type.as_str()],
            )
            .await?;

        row.as_ref().map(template_from_row).transpose()
    }

    async fn list_by_type(
        &self,
        template_type: TemplateType,
    ) -> Result<Vec<MessageTemplate>, Error> {
        let rows = self
            .client
            .query(
                &format!(
                    "SELECT {} FROM whatsapp_templates WHERE type = $1 ORDER BY id",
                    TEMPLATE_COLUMNS
                ),
                &[&template_type.as_str()],
            )
            .await?;

        rows.iter().map(template_from_row).collect()
    }

    async fn insert(&self, template: CreateTemplate) -> Result<MessageTemplate, Error> {
        // One statement, so clearing the siblings and inserting commit together.
        let row = self
            .client
            .query_one(
                &format!(
                    "WITH cleared AS (
                        UPDATE whatsapp_templates SET is_default = FALSE, updated_at = now()
                        WHERE $6 AND type = $2 AND is_default
                    )
                    INSERT INTO whatsapp_templates
                        (name, type, subject, content, variables, is_default, is_active)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    RETURNING {}",
                    TEMPLATE_COLUMNS
                ),
                &[
                    &template.name,
                    &template.template_type.as_str(),
                    &template.subject,
                    &template.body,
                    &template.variables,
                    &template.is_default,
                    &template.is_active,
                ],
            )
            .await?;

        template_from_row(&row)
    }

    async fn set_default(&self, id: i64) -> Result<MessageTemplate, Error> {
        let updated = self
            .client
            .execute(
                "UPDATE whatsapp_templates
                 SET is_default = (id = $1), updated_at = now()
                 WHERE type = (SELECT type FROM whatsapp_templates WHERE id = $1)",
                &[&id],
            )
            .await?;

        if updated == 0 {
            return Err(anyhow!("Template {} not found", id));
        }

        let row = self
            .client
            .query_one(
                &format!("SELECT {} FROM whatsapp_templates WHERE id = $1", TEMPLATE_COLUMNS),
                &[&id],
            )
            .await?;

        template_from_row(&row)
    }
}

#[async_trait]
impl IntegrationStore for DatabaseClient {
    async fn fetch(&self) -> Result<Option<IntegrationConfig>, Error> {
        let Some(row) = self
            .client
            .query_opt(
                "SELECT enabled, config FROM integration_settings WHERE type = $1",
                &[&INTEGRATION_TYPE],
            )
            .await?
        else {
            return Ok(None);
        };

        let enabled: bool = row.try_get("enabled")?;
        let raw: JsonValue = row.try_get("config")?;

        let mut config: IntegrationConfig = serde_json::from_value(raw)
            .map_err(|e| anyhow!("Invalid WhatsApp integration config: {}", e))?;
        config.enabled = enabled;
        config.api_base_url = config.base_url().to_string();

        Ok(Some(config))
    }

    async fn record_test_result(&self, result: &ConnectionTestResult) -> Result<(), Error> {
        self.client
            .execute(
                "UPDATE integration_settings
                 SET last_test_success = $1, last_test_message = $2, last_tested_at = $3
                 WHERE type = $4",
                &[
                    &result.success,
                    &result.message,
                    &result.tested_at,
                    &INTEGRATION_TYPE,
                ],
            )
            .await
            .map_err(|e| anyhow!("Failed to record connection test: {}", e))?;

        Ok(())
    }
}
