use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::models::{
    response::SendResult,
    status::{DeliveryStatus, NotificationType},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryLogEntry {
    pub id: Uuid,
    pub recipient_phone: String,
    pub notification_type: NotificationType,
    pub rendered_body: String,
    pub customer_id: Option<i64>,
    pub invoice_id: Option<i64>,
    pub status: DeliveryStatus,
    pub raw_response: Option<JsonValue>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A delivery log row before it is written.
///
/// The id and timestamp are fixed at construction, so writing the same log
/// twice lands on the same row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateDeliveryLog {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub recipient_phone: String,
    pub notification_type: NotificationType,
    pub rendered_body: String,
    pub customer_id: Option<i64>,
    pub invoice_id: Option<i64>,
    pub status: DeliveryStatus,
    pub raw_response: Option<JsonValue>,
    pub error_message: Option<String>,
}

impl CreateDeliveryLog {
    pub fn new(
        recipient_phone: String,
        notification_type: NotificationType,
        rendered_body: String,
        status: DeliveryStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            recipient_phone,
            notification_type,
            rendered_body,
            customer_id: None,
            invoice_id: None,
            status,
            raw_response: None,
            error_message: None,
        }
    }

    /// Builds the row for one send attempt; the status follows the result.
    pub fn from_result(
        recipient_phone: String,
        notification_type: NotificationType,
        rendered_body: String,
        result: &SendResult,
    ) -> Self {
        let mut log = Self::new(
            recipient_phone,
            notification_type,
            rendered_body,
            DeliveryStatus::from_success(result.success()),
        );
        log.raw_response = result.raw_response().cloned();

        if !result.success() {
            log.error_message = Some(
                result
                    .error_detail()
                    .unwrap_or("Unknown error")
                    .to_string(),
            );
        }

        log
    }

    pub fn with_customer(mut self, customer_id: Option<i64>) -> Self {
        self.customer_id = customer_id;
        self
    }

    pub fn with_invoice(mut self, invoice_id: Option<i64>) -> Self {
        self.invoice_id = invoice_id;
        self
    }

    pub fn into_entry(self) -> DeliveryLogEntry {
        DeliveryLogEntry {
            id: self.id,
            recipient_phone: self.recipient_phone,
            notification_type: self.notification_type,
            rendered_body: self.rendered_body,
            customer_id: self.customer_id,
            invoice_id: self.invoice_id,
            status: self.status,
            raw_response: self.raw_response,
            error_message: self.error_message,
            created_at: self.created_at,
        }
    }
}
