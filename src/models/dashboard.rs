use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters shown on the admin dashboard. Missing counters read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub total_devices: u64,
    pub available_devices: u64,
    pub active_borrowings: u64,
    pub overdue_borrowings: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Payment,
    PendingPayment,
    Overdue,
    Warning,
    #[serde(other)]
    Info,
}

impl NotificationKind {
    pub fn title(self) -> &'static str {
        match self {
            NotificationKind::Payment => "Payment Received",
            NotificationKind::PendingPayment => "Pending Payment",
            NotificationKind::Overdue => "Overdue Device",
            NotificationKind::Warning => "Return Reminder",
            NotificationKind::Info => "Notification",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Notification {
    /// Untimestamped notifications never expire.
    pub fn is_recent(&self, cutoff: DateTime<Utc>) -> bool {
        self.timestamp.map_or(true, |at| at >= cutoff)
    }
}
