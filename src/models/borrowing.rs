use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::link::{merge_links, Linked};
use super::{DeviceSummary, Entity, Identified, UserSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BorrowingStatus {
    #[default]
    Pending,
    Active,
    Returned,
    Overdue,
}

impl fmt::Display for BorrowingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BorrowingStatus::Pending => "Pending",
            BorrowingStatus::Active => "Active",
            BorrowingStatus::Returned => "Returned",
            BorrowingStatus::Overdue => "Overdue",
        };
        f.write_str(label)
    }
}

/// Settlement state of a borrowing's fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Pending,
    #[default]
    #[serde(rename = "N/A", other)]
    NotApplicable,
}

/// How a fine should be presented to the borrower.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FineStatus {
    /// No fine accrued.
    NotRequired,
    /// A fine is outstanding.
    Payable(Decimal),
    /// The fine has been paid.
    Settled,
}

/// A time-bounded loan of one device to one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "BorrowingWire")]
pub struct Borrowing {
    #[serde(rename = "_id")]
    pub id: String,
    pub device_id: String,
    pub device: Option<DeviceSummary>,
    pub user_id: String,
    pub user: Option<UserSummary>,
    pub borrow_date: Option<DateTime<Utc>>,
    pub return_date: Option<DateTime<Utc>>,
    pub actual_return_date: Option<DateTime<Utc>>,
    pub status: BorrowingStatus,
    pub condition_before: Option<String>,
    pub condition_after: Option<String>,
    pub fine: Decimal,
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
}

impl Identified for Borrowing {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Borrowing {}

impl Borrowing {
    /// Paid always reads as settled, whatever amount is recorded.
    pub fn fine_status(&self) -> FineStatus {
        if self.payment_status == PaymentStatus::Paid {
            FineStatus::Settled
        } else if self.fine > Decimal::ZERO {
            FineStatus::Payable(self.fine)
        } else {
            FineStatus::NotRequired
        }
    }

    pub fn device_name(&self) -> &str {
        self.device
            .as_ref()
            .and_then(|device| device.name.as_deref())
            .unwrap_or("Unknown Device")
    }

    pub fn borrower_name(&self) -> &str {
        self.user
            .as_ref()
            .map(UserSummary::display_name)
            .unwrap_or("Unknown User")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BorrowingWire {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    device_id: Option<Linked<DeviceSummary>>,
    #[serde(default)]
    device: Option<Linked<DeviceSummary>>,
    #[serde(default)]
    user_id: Option<Linked<UserSummary>>,
    #[serde(default)]
    user: Option<Linked<UserSummary>>,
    #[serde(default)]
    borrow_date: Option<DateTime<Utc>>,
    #[serde(default)]
    return_date: Option<DateTime<Utc>>,
    #[serde(default)]
    actual_return_date: Option<DateTime<Utc>>,
    #[serde(default)]
    status: Option<BorrowingStatus>,
    #[serde(default)]
    condition_before: Option<String>,
    #[serde(default)]
    condition_after: Option<String>,
    #[serde(default)]
    fine: Option<Decimal>,
    #[serde(default)]
    payment_status: Option<PaymentStatus>,
    #[serde(default)]
    notes: Option<String>,
}

impl From<BorrowingWire> for Borrowing {
    fn from(wire: BorrowingWire) -> Self {
        let (device_id, device) = merge_links(wire.device_id, wire.device);
        let (user_id, user) = merge_links(wire.user_id, wire.user);
        Self {
            id: wire.id,
            device_id,
            device,
            user_id,
            user,
            borrow_date: wire.borrow_date,
            return_date: wire.return_date,
            actual_return_date: wire.actual_return_date,
            status: wire.status.unwrap_or_default(),
            condition_before: wire.condition_before,
            condition_after: wire.condition_after,
            fine: wire.fine.unwrap_or_default(),
            payment_status: wire.payment_status.unwrap_or_default(),
            notes: wire.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn borrowing(json: &str) -> Borrowing {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_fine_payable_when_pending() {
        let b = borrowing(r#"{"_id":"b1","fine":5,"paymentStatus":"Pending"}"#);
        assert_eq!(b.fine_status(), FineStatus::Payable(Decimal::from(5)));
    }

    #[test]
    fn test_zero_fine_not_required() {
        let b = borrowing(r#"{"_id":"b1","fine":0}"#);
        assert_eq!(b.fine_status(), FineStatus::NotRequired);
    }

    #[test]
    fn test_paid_is_settled_regardless_of_amount() {
        let b = borrowing(r#"{"_id":"b1","fine":12.5,"paymentStatus":"Paid"}"#);
        assert_eq!(b.fine_status(), FineStatus::Settled);
        let b = borrowing(r#"{"_id":"b2","fine":0,"paymentStatus":"Paid"}"#);
        assert_eq!(b.fine_status(), FineStatus::Settled);
    }

    #[test]
    fn test_unknown_payment_status_is_not_applicable() {
        let b = borrowing(r#"{"_id":"b1","paymentStatus":"Waived"}"#);
        assert_eq!(b.payment_status, PaymentStatus::NotApplicable);
    }

    #[test]
    fn test_lookup_arrays_normalize_to_objects() {
        let b = borrowing(
            r#"{"_id":"b1","deviceId":"d1","userId":"u1",
                "device":[{"_id":"d1","name":"Laptop"}],
                "user":[{"_id":"u1","username":"alice"}],
                "status":"Active"}"#,
        );
        assert_eq!(b.device_id, "d1");
        assert_eq!(b.device_name(), "Laptop");
        assert_eq!(b.user_id, "u1");
        assert_eq!(b.borrower_name(), "alice");
        assert_eq!(b.status, BorrowingStatus::Active);
    }

    #[test]
    fn test_populated_id_fields_normalize_to_objects() {
        let b = borrowing(
            r#"{"_id":"b1","deviceId":{"_id":"d1","name":"Camera"},"userId":{"_id":"u1"}}"#,
        );
        assert_eq!(b.device_id, "d1");
        assert_eq!(b.device_name(), "Camera");
        assert_eq!(b.user_id, "u1");
        assert_eq!(b.borrower_name(), "Anonymous");
    }

    #[test]
    fn test_bare_ids_leave_objects_empty() {
        let b = borrowing(r#"{"_id":"b1","deviceId":"d1","userId":"u1"}"#);
        assert!(b.device.is_none());
        assert_eq!(b.device_name(), "Unknown Device");
        assert_eq!(b.status, BorrowingStatus::Pending);
        assert_eq!(b.fine, Decimal::ZERO);
    }

    #[test]
    fn test_canonical_form_reparses_identically() {
        let b = borrowing(
            r#"{"_id":"b1","deviceId":"d1","device":[{"_id":"d1","name":"Laptop"}],
                "userId":"u1","fine":3,"paymentStatus":"Pending",
                "returnDate":"2030-01-01T00:00:00Z"}"#,
        );
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(borrowing(&json), b);
    }
}
