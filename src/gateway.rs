use std::{sync::Arc, time::Duration};

use anyhow::{Error, Result};
use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::{
    clients::{
        delivery_log::DeliveryLog,
        http::HttpExecutor,
        integration::IntegrationStore,
        providers::adapter_for,
        template::{self, TemplateStore},
    },
    compose,
    error::GatewayError,
    models::{
        audit::CreateDeliveryLog,
        integration::{ConnectionTestResult, IntegrationConfig, ProviderKind, TestConnectionRequest},
        notification::Notification,
        phone::normalize_phone,
        response::{SendResult, StatusReport},
        retry::RetryConfig,
        template::{RenderContext, TemplateType},
    },
    utils::retry_with_backoff,
};

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub app_name: String,
    /// Backoff applied to delivery log writes.
    pub log_retry: RetryConfig,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            app_name: "ISP Billing".to_string(),
            log_retry: RetryConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Send,
    Status,
}

/// Entry point for outbound WhatsApp notifications.
///
/// Holds a snapshot of the integration settings taken at construction; a
/// changed configuration means a new gateway (or `with_override`).
#[derive(Clone)]
pub struct NotificationGateway {
    config: Option<IntegrationConfig>,
    executor: HttpExecutor,
    delivery_log: Arc<dyn DeliveryLog>,
    app_name: String,
    log_retry: RetryConfig,
}

impl NotificationGateway {
    pub fn new(
        config: Option<IntegrationConfig>,
        settings: &GatewaySettings,
        delivery_log: Arc<dyn DeliveryLog>,
    ) -> Result<Self, Error> {
        let executor = HttpExecutor::new(settings.connect_timeout, settings.request_timeout)?;

        Ok(Self {
            config,
            executor,
            delivery_log,
            app_name: settings.app_name.clone(),
            log_retry: settings.log_retry.clone(),
        })
    }

    pub fn config(&self) -> Option<&IntegrationConfig> {
        self.config.as_ref()
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// A gateway bound to `config`, force-enabled, sharing this gateway's
    /// HTTP client and delivery log. `self` is left untouched.
    pub fn with_override(&self, config: IntegrationConfig) -> Self {
        Self {
            config: Some(IntegrationConfig {
                enabled: true,
                ..config
            }),
            ..self.clone()
        }
    }

    fn resolve(&self, operation: Operation) -> Result<(ProviderKind, &IntegrationConfig), GatewayError> {
        let config = self
            .config
            .as_ref()
            .filter(|config| config.enabled)
            .ok_or(GatewayError::NotConfigured)?;

        let kind = config.provider_kind()?;

        // The custom backend answers status from its own settings.
        if operation == Operation::Send || kind != ProviderKind::Custom {
            config.ensure_credentials()?;
        }

        Ok((kind, config))
    }

    /// Sends `message` to `phone`. Every failure comes back as a failed
    /// `SendResult`.
    pub async fn send(&self, phone: &str, message: &str) -> SendResult {
        let (kind, config) = match self.resolve(Operation::Send) {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!(error = %e, "WhatsApp send skipped");
                return SendResult::failed(e.to_string(), None);
            }
        };

        let phone = normalize_phone(phone);
        let adapter = adapter_for(kind, config, &self.executor);
        let provider = adapter.kind();
        debug!(provider = %provider, phone = %phone, "Sending WhatsApp message");

        let result = adapter.send(&phone, message).await;

        if result.success() {
            info!(provider = %provider, phone = %phone, "WhatsApp message delivered to provider");
        } else {
            error!(
                provider = %provider,
                phone = %phone,
                error = result.error_detail().unwrap_or_default(),
                "WhatsApp message not delivered"
            );
        }

        result
    }

    /// Composes, sends and records one built-in notification.
    pub async fn send_notification(&self, notification: &Notification) -> SendResult {
        let notification_type = notification.notification_type();
        let message = compose::compose(notification, &self.app_name, Utc::now().date_naive());

        let result = self.send(notification.recipient_phone(), &message).await;

        let log = CreateDeliveryLog::from_result(
            normalize_phone(notification.recipient_phone()),
            notification_type,
            message,
            &result,
        )
        .with_customer(notification.customer_id())
        .with_invoice(notification.invoice_id());

        self.record_delivery(&log).await;

        result
    }

    async fn record_delivery(&self, log: &CreateDeliveryLog) {
        let delivery_log = &self.delivery_log;

        match retry_with_backoff(&self.log_retry, || delivery_log.append(log)).await {
            Ok(entry) => debug!(
                id = %entry.id,
                notification_type = %entry.notification_type,
                status = %entry.status,
                "Delivery recorded"
            ),
            Err(e) => warn!(
                error = %e,
                phone = %log.recipient_phone,
                notification_type = %log.notification_type,
                "Failed to write delivery log"
            ),
        }
    }

    pub async fn check_status(&self) -> StatusReport {
        match self.resolve(Operation::Status) {
            Ok((kind, config)) => {
                let adapter = adapter_for(kind, config, &self.executor);
                let report = adapter.check_status().await;
                debug!(
                    provider = %adapter.kind(),
                    connected = report.connected,
                    "WhatsApp status checked"
                );
                report
            }
            Err(e) => StatusReport::disconnected(e.to_string()),
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.check_status().await.connected
    }

    /// Sends a timestamped test message with the submitted settings and
    /// records the outcome in `store`.
    pub async fn test_connection(
        &self,
        store: &dyn IntegrationStore,
        request: &TestConnectionRequest,
    ) -> SendResult {
        let gateway = self.with_override(request.to_config());
        let message = compose::test_message(&self.app_name, Utc::now());

        let result = gateway.send(&request.test_number, &message).await;

        let outcome = ConnectionTestResult {
            success: result.success(),
            message: result
                .provider_message()
                .or(result.error_detail())
                .unwrap_or_default()
                .to_string(),
            tested_at: Utc::now(),
        };

        if let Err(e) = store.record_test_result(&outcome).await {
            warn!(error = %e, "Failed to record connection test result");
        }

        info!(
            provider = %request.provider,
            success = outcome.success,
            "WhatsApp connection test finished"
        );

        result
    }

    /// Renders the default template of `template_type`; `app_name` is filled
    /// in when the caller did not supply it.
    pub async fn render_default(
        &self,
        store: &dyn TemplateStore,
        template_type: TemplateType,
        context: &RenderContext,
    ) -> Result<Option<String>, Error> {
        let mut context = context.clone();
        context
            .entry("app_name".to_string())
            .or_insert_with(|| self.app_name.clone());

        template::render_default(store, template_type, &context).await
    }
}
