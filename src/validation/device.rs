use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::Validate;

use super::{derived, FieldErrors, Schema};
use crate::location::PositionProvider;
use crate::models::DeviceStatus;
use crate::precondition::{ensure_position, PreconditionError};

/// A new device as submitted to `/saveDevice`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDraft {
    #[validate(length(min = 2, message = "Minimum 2 characters required.."))]
    pub name: String,
    #[validate(length(min = 3, message = "Minimum 3 characters required.."))]
    pub serial_number: String,
    pub category: String,
    pub status: DeviceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<DateTime<Utc>>,
}

impl Schema for DeviceDraft {
    fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = derived(self);
        errors.require("name", &self.name, "Device Name is Required..");
        errors.require(
            "serial_number",
            &self.serial_number,
            "Serial Number is Required..",
        );
        errors.require("category", &self.category, "Category is Required..");
        errors.into_result()
    }
}

impl DeviceDraft {
    /// Tags the draft with the operator's current position.
    pub fn share_location(
        &mut self,
        provider: &dyn PositionProvider,
    ) -> Result<(), PreconditionError> {
        let here = ensure_position(provider)?;
        self.lat = Some(here.lat);
        self.lng = Some(here.lng);
        Ok(())
    }
}

/// Fields to change on an existing device.
///
/// The serial number is only mandatory at creation; when present here it
/// still has to meet the same length rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DevicePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, message = "Minimum 2 characters required.."))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, message = "Minimum 3 characters required.."))]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Category is Required.."))]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DeviceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl Schema for DevicePatch {
    fn check(&self) -> Result<(), FieldErrors> {
        derived(self).into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{Coordinates, FixedPosition};

    fn draft() -> DeviceDraft {
        DeviceDraft {
            name: "Dell Latitude".to_string(),
            serial_number: "DL-5520".to_string(),
            category: "Laptop".to_string(),
            ..DeviceDraft::default()
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(draft().check().is_ok());
    }

    #[test]
    fn test_all_violations_collected() {
        let bad = DeviceDraft {
            name: "X".to_string(),
            serial_number: "AB".to_string(),
            category: String::new(),
            ..DeviceDraft::default()
        };
        let errors = bad.check().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("name"), ["Minimum 2 characters required.."]);
        assert_eq!(
            errors.get("serial_number"),
            ["Minimum 3 characters required.."]
        );
        assert_eq!(errors.get("category"), ["Category is Required.."]);
    }

    #[test]
    fn test_empty_name_reports_required() {
        let bad = DeviceDraft {
            name: String::new(),
            ..draft()
        };
        let errors = bad.check().unwrap_err();
        assert_eq!(errors.get("name"), ["Device Name is Required.."]);
    }

    #[test]
    fn test_patch_without_serial_passes() {
        let patch = DevicePatch {
            name: Some("Projector".to_string()),
            ..DevicePatch::default()
        };
        assert!(patch.check().is_ok());
    }

    #[test]
    fn test_patch_checks_present_fields() {
        let patch = DevicePatch {
            serial_number: Some("A".to_string()),
            ..DevicePatch::default()
        };
        assert!(patch.check().unwrap_err().contains("serial_number"));
    }

    #[test]
    fn test_share_location() {
        let mut d = draft();
        let here = Coordinates { lat: 23.58, lng: 58.38 };
        d.share_location(&FixedPosition(Some(here))).unwrap();
        assert_eq!((d.lat, d.lng), (Some(23.58), Some(58.38)));

        let mut d = draft();
        assert_eq!(
            d.share_location(&FixedPosition(None)),
            Err(PreconditionError::LocationUnavailable)
        );
        assert!(d.lat.is_none());
    }

    #[test]
    fn test_draft_serializes_camel_case() {
        let json = serde_json::to_value(draft()).unwrap();
        assert_eq!(json["serialNumber"], "DL-5520");
        assert_eq!(json["status"], "Available");
        assert!(json["lat"].is_null());
        assert!(json.get("location").is_none());
    }
}
