use serde::Serialize;
use validator::Validate;

use super::{derived, FieldErrors, Schema};
use crate::models::User;
use crate::precondition::{ensure_signed_in, PreconditionError};

const RATING_MIN: u8 = 1;
const RATING_MAX: u8 = 5;

fn check_rating(errors: &mut FieldErrors, rating: u8) {
    if rating < RATING_MIN {
        errors.push("rating", "Minimum rating is 1..");
    } else if rating > RATING_MAX {
        errors.push("rating", "Maximum rating is 5..");
    }
}

/// A review to publish against a device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub device_id: String,
    pub user_id: String,
    #[validate(length(min = 10, message = "Minimum 10 characters required.."))]
    pub text: String,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl PostDraft {
    /// Starts a review by the signed-in user.
    pub fn by(
        user: Option<&User>,
        device_id: impl Into<String>,
    ) -> Result<Self, PreconditionError> {
        let author = ensure_signed_in(user, "write a review")?;
        Ok(Self {
            device_id: device_id.into(),
            user_id: author.id.clone(),
            ..Self::default()
        })
    }
}

impl Schema for PostDraft {
    fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = derived(self);
        errors.require("device_id", &self.device_id, "Device ID is Required..");
        errors.require("user_id", &self.user_id, "User ID is Required..");
        errors.require("text", &self.text, "Review Text is Required..");
        check_rating(&mut errors, self.rating);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 10, message = "Minimum 10 characters required.."))]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Schema for PostPatch {
    fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = derived(self);
        if let Some(rating) = self.rating {
            check_rating(&mut errors, rating);
        }
        errors.into_result()
    }
}
