//! Field-level validation run before any create/update is submitted.
//!
//! Every schema collects all violations in one pass, keyed by field name,
//! so a form can show each message next to its input at once.

mod borrowing;
mod device;
mod payment;
mod post;
mod user;

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;

use serde::Serialize;

pub use borrowing::{BorrowingDraft, BorrowingPatch, DEFAULT_CONDITION};
pub use device::{DeviceDraft, DevicePatch};
pub use payment::{CardDetails, FinePayment, PaymentMethod};
pub use post::{PostDraft, PostPatch};
pub use user::{Credentials, Registration, UserUpdate};

/// Validation failures keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Replaces whatever was recorded for `field` with a single message.
    pub fn replace(&mut self, field: &str, message: impl Into<String>) {
        self.fields.insert(field.to_string(), vec![message.into()]);
    }

    /// Messages recorded for `field`; empty if it passed.
    pub fn get(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Records `message` for `field` when a required value is empty,
    /// superseding any length rule that also fired.
    pub(crate) fn require(&mut self, field: &str, value: &str, message: &str) {
        if value.is_empty() {
            self.replace(field, message);
        }
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut collected = FieldErrors::new();
        for (field, list) in errors.field_errors() {
            for error in list.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                collected.push(&field.to_string(), message);
            }
        }
        collected
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in self.iter() {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// A set of field rules for one kind of submission.
pub trait Schema {
    fn check(&self) -> Result<(), FieldErrors>;
}

/// Runs the `validator` derive and converts its report.
pub(crate) fn derived<T: validator::Validate>(value: &T) -> FieldErrors {
    match value.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => errors.into(),
    }
}

/// A payload that passed its schema.
///
/// Store mutations only accept `Validated` values, so nothing unchecked
/// reaches the network.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Validated<T>(T);

impl<T: Schema> Validated<T> {
    pub fn new(value: T) -> Result<Self, FieldErrors> {
        value.check()?;
        Ok(Self(value))
    }
}

impl<T> Validated<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_every_message() {
        let mut errors = FieldErrors::new();
        errors.push("name", "Minimum 2 characters required..");
        errors.push("category", "Category is Required..");
        assert_eq!(
            errors.to_string(),
            "category: Category is Required..; name: Minimum 2 characters required.."
        );
    }

    #[test]
    fn test_require_supersedes_length_rule() {
        let mut errors = FieldErrors::new();
        errors.push("name", "Minimum 2 characters required..");
        errors.require("name", "", "Device Name is Required..");
        assert_eq!(errors.get("name"), ["Device Name is Required.."]);

        errors.require("category", "Phones", "Category is Required..");
        assert!(!errors.contains("category"));
    }
}
