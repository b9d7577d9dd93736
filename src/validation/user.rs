use serde::Serialize;
use validator::{Validate, ValidationError};

use super::{derived, FieldErrors, Schema};
use crate::models::{AccountStatus, Role, UserPatch};

const PASSWORD_MIN: usize = 8;

/// Blank passwords are left to the required rule.
fn password_length(password: &str) -> Result<(), ValidationError> {
    if password.trim().is_empty() || password.chars().count() >= PASSWORD_MIN {
        return Ok(());
    }
    Err(ValidationError::new("password_length")
        .with_message("Password should be at least 8 characters..".into()))
}

fn require_login_fields(errors: &mut FieldErrors, email: &str, password: &str) {
    errors.require("email", email, "Email is Required..");
    errors.require("password", password.trim(), "Password is Required..");
}

/// Body of `POST /login`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct Credentials {
    #[validate(email(message = "Not a Valid Email Format!!"))]
    pub email: String,
    #[validate(custom(function = "password_length"))]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl Schema for Credentials {
    fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = derived(self);
        require_login_fields(&mut errors, &self.email, &self.password);
        errors.into_result()
    }
}

/// Body of `POST /register`. The confirmation never leaves the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[validate(length(min = 3, message = "Minimum 3 characters required.."))]
    pub username: String,
    #[validate(email(message = "Not a Valid Email Format!!"))]
    pub email: String,
    #[validate(custom(function = "password_length"))]
    pub password: String,
    #[serde(skip)]
    #[validate(must_match(other = "password", message = "Passwords do not match.."))]
    pub confirm_password: String,
    pub role: Role,
}

impl Schema for Registration {
    fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = derived(self);
        errors.require("username", &self.username, "Username is Required..");
        require_login_fields(&mut errors, &self.email, &self.password);
        errors.require(
            "confirm_password",
            &self.confirm_password,
            "Password Confirmation is Required..",
        );
        errors.into_result()
    }
}

/// Account fields an administrator may change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, message = "Minimum 3 characters required.."))]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Not a Valid Email Format!!"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AccountStatus>,
}

impl Schema for UserUpdate {
    fn check(&self) -> Result<(), FieldErrors> {
        derived(self).into_result()
    }
}

impl From<&UserUpdate> for UserPatch {
    fn from(update: &UserUpdate) -> Self {
        UserPatch {
            username: update.username.clone(),
            email: update.email.clone(),
            role: update.role,
            status: update.status,
        }
    }
}
