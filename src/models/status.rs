use std::{
    fmt::{Display, Formatter, Result},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Failed,
}

impl DeliveryStatus {
    pub fn from_success(success: bool) -> Self {
        if success {
            DeliveryStatus::Sent
        } else {
            DeliveryStatus::Failed
        }
    }
}

impl Display for DeliveryStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            DeliveryStatus::Sent => write!(f, "sent"),
            DeliveryStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for DeliveryStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "sent" => Ok(DeliveryStatus::Sent),
            "failed" => Ok(DeliveryStatus::Failed),
            other => Err(anyhow::anyhow!("Unknown delivery status '{}'", other)),
        }
    }
}

/// Kind of built-in notification recorded in the delivery log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Invoice,
    Payment,
    Reminder,
    Suspension,
    Voucher,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Invoice => "invoice",
            NotificationType::Payment => "payment",
            NotificationType::Reminder => "reminder",
            NotificationType::Suspension => "suspension",
            NotificationType::Voucher => "voucher",
        }
    }
}

impl Display for NotificationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "invoice" => Ok(NotificationType::Invoice),
            "payment" => Ok(NotificationType::Payment),
            "reminder" => Ok(NotificationType::Reminder),
            "suspension" => Ok(NotificationType::Suspension),
            "voucher" => Ok(NotificationType::Voucher),
            other => Err(anyhow::anyhow!("Unknown notification type '{}'", other)),
        }
    }
}
