use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::status::NotificationType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub number: String,
    pub package_name: String,
    /// Whole rupiah.
    pub amount: i64,
    pub due_date: Option<NaiveDate>,
    pub paid_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoucherCredential {
    pub code: String,
    pub password: String,
}

/// A built-in notification together with the data its message copy needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    InvoiceIssued {
        customer: Customer,
        invoice: Invoice,
    },
    PaymentConfirmed {
        customer: Customer,
        invoice: Invoice,
    },
    PaymentReminder {
        customer: Customer,
        invoice: Invoice,
    },
    ServiceSuspended {
        customer: Customer,
    },
    VoucherDelivery {
        phone: String,
        package: String,
        vouchers: Vec<VoucherCredential>,
    },
}

impl Notification {
    pub fn notification_type(&self) -> NotificationType {
        match self {
            Notification::InvoiceIssued { .. } => NotificationType::Invoice,
            Notification::PaymentConfirmed { .. } => NotificationType::Payment,
            Notification::PaymentReminder { .. } => NotificationType::Reminder,
            Notification::ServiceSuspended { .. } => NotificationType::Suspension,
            Notification::VoucherDelivery { .. } => NotificationType::Voucher,
        }
    }

    pub fn recipient_phone(&self) -> &str {
        match self {
            Notification::InvoiceIssued { customer, .. }
            | Notification::PaymentConfirmed { customer, .. }
            | Notification::PaymentReminder { customer, .. }
            | Notification::ServiceSuspended { customer } => &customer.phone,
            Notification::VoucherDelivery { phone, .. } => phone,
        }
    }

    pub fn customer_id(&self) -> Option<i64> {
        match self {
            Notification::InvoiceIssued { customer, .. }
            | Notification::PaymentConfirmed { customer, .. }
            | Notification::PaymentReminder { customer, .. }
            | Notification::ServiceSuspended { customer } => Some(customer.id),
            Notification::VoucherDelivery { .. } => None,
        }
    }

    pub fn invoice_id(&self) -> Option<i64> {
        match self {
            Notification::InvoiceIssued { invoice, .. }
            | Notification::PaymentConfirmed { invoice, .. }
            | Notification::PaymentReminder { invoice, .. } => Some(invoice.id),
            _ => None,
        }
    }
}
