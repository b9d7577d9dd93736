use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use validator::Validate;

use super::{derived, FieldErrors, Schema};
use crate::models::{BorrowingStatus, Device, User};
use crate::precondition::{ensure_can_borrow, PreconditionError};

/// Condition recorded when a borrower requests a device themselves.
pub const DEFAULT_CONDITION: &str = "Excellent";

/// A borrowing request as submitted to `/saveBorrowing`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BorrowingDraft {
    pub device_id: String,
    pub user_id: String,
    pub return_date: Option<DateTime<Utc>>,
    #[validate(length(min = 3, message = "Minimum 3 characters required.."))]
    pub condition_before: String,
}

impl BorrowingDraft {
    /// Builds the request a borrower makes for `device`.
    pub fn request(
        user: Option<&User>,
        device: Option<&Device>,
        return_date: DateTime<Utc>,
    ) -> Result<Self, PreconditionError> {
        let borrower = ensure_can_borrow(user, device)?;
        let device_id = device.map(|d| d.id.clone()).unwrap_or_default();
        Ok(Self {
            device_id,
            user_id: borrower.id.clone(),
            return_date: Some(return_date),
            condition_before: DEFAULT_CONDITION.to_string(),
        })
    }

    /// Checks the draft against `now`; the return date must lie strictly after it.
    pub fn check_at(&self, now: DateTime<Utc>) -> Result<(), FieldErrors> {
        let mut errors = derived(self);
        errors.require("device_id", &self.device_id, "Device ID is Required..");
        errors.require("user_id", &self.user_id, "User ID is Required..");
        errors.require(
            "condition_before",
            &self.condition_before,
            "Device Condition Before Borrowing is Required..",
        );
        match self.return_date {
            None => errors.push("return_date", "Return Date is Required.."),
            Some(date) if date <= now => {
                errors.push("return_date", "Return Date must be in the future..")
            }
            Some(_) => {}
        }
        errors.into_result()
    }
}

impl Schema for BorrowingDraft {
    fn check(&self) -> Result<(), FieldErrors> {
        self.check_at(Utc::now())
    }
}

/// Administrative changes to a borrowing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BorrowingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_return_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fine: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Schema for BorrowingPatch {
    fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.fine.is_some_and(|fine| fine < Decimal::ZERO) {
            errors.push("fine", "Fine must be positive number..");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountStatus, DeviceStatus, Role};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn draft(return_date: Option<DateTime<Utc>>) -> BorrowingDraft {
        BorrowingDraft {
            device_id: "d1".to_string(),
            user_id: "u1".to_string(),
            return_date,
            condition_before: DEFAULT_CONDITION.to_string(),
        }
    }

    #[test]
    fn test_future_return_date_passes() {
        assert!(draft(Some(now() + Duration::days(3))).check_at(now()).is_ok());
    }

    #[test]
    fn test_return_date_must_be_strictly_future() {
        let errors = draft(Some(now())).check_at(now()).unwrap_err();
        assert_eq!(
            errors.get("return_date"),
            ["Return Date must be in the future.."]
        );

        let errors = draft(None).check_at(now()).unwrap_err();
        assert_eq!(errors.get("return_date"), ["Return Date is Required.."]);
    }

    #[test]
    fn test_short_condition_rejected() {
        let mut d = draft(Some(now() + Duration::hours(1)));
        d.condition_before = "ok".to_string();
        let errors = d.check_at(now()).unwrap_err();
        assert_eq!(
            errors.get("condition_before"),
            ["Minimum 3 characters required.."]
        );
    }

    #[test]
    fn test_request_fills_ids_and_default_condition() {
        let user = User {
            id: "u1".to_string(),
            username: "sam".to_string(),
            email: "sam@example.com".to_string(),
            role: Role::Student,
            status: AccountStatus::Active,
        };
        let device = Device {
            id: "d7".to_string(),
            name: "Camera".to_string(),
            serial_number: "CAM-1".to_string(),
            category: "Media".to_string(),
            status: DeviceStatus::Available,
            location: None,
            lat: None,
            lng: None,
            description: None,
            image: None,
            purchase_date: None,
        };
        let request =
            BorrowingDraft::request(Some(&user), Some(&device), now() + Duration::days(1)).unwrap();
        assert_eq!(request.device_id, "d7");
        assert_eq!(request.user_id, "u1");
        assert_eq!(request.condition_before, "Excellent");

        assert_eq!(
            BorrowingDraft::request(None, Some(&device), now()),
            Err(PreconditionError::NotSignedIn {
                action: "request borrowing"
            })
        );
    }

    #[test]
    fn test_patch_rejects_negative_fine() {
        let patch = BorrowingPatch {
            fine: Some(Decimal::new(-5, 0)),
            ..BorrowingPatch::default()
        };
        assert_eq!(
            patch.check().unwrap_err().get("fine"),
            ["Fine must be positive number.."]
        );

        let zero = BorrowingPatch {
            fine: Some(Decimal::ZERO),
            ..BorrowingPatch::default()
        };
        assert!(zero.check().is_ok());
    }

    #[test]
    fn test_draft_wire_shape() {
        let json = serde_json::to_value(draft(Some(now()))).unwrap();
        assert_eq!(json["deviceId"], "d1");
        assert_eq!(json["conditionBefore"], "Excellent");
        assert_eq!(json["returnDate"], "2026-03-01T12:00:00Z");
    }
}
