//! Field-keyed validation failures collected across a whole request.
//!
//! Validators push every violation they find instead of stopping at the
//! first; adapters receive one `invalid_request` error whose `details` object
//! maps each field name to its message.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::Error;

/// Message used for the top-level error when details carry the specifics.
pub const VALIDATION_FAILED: &str = "Validation failed";

/// Ordered map of field name to violation message.
///
/// Only the first message recorded for a field is kept.
///
/// # Examples
/// ```
/// use recipe_notebook::domain::FieldErrors;
///
/// let mut errors = FieldErrors::default();
/// errors.push("size", "Page size must be between 1 and 100");
/// errors.push("size", "ignored");
/// assert_eq!(errors.get("size"), Some("Page size must be between 1 and 100"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Record a violation unless the field already has one.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// `true` when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with a violation.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Iterate violations in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Return `value` when no violation was recorded, otherwise `self`.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }

    /// Render as a JSON object suitable for error details.
    pub fn to_details(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(field, message)| (field.clone(), Value::String(message.clone())))
                .collect::<Map<_, _>>(),
        )
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl From<FieldErrors> for Error {
    fn from(value: FieldErrors) -> Self {
        Error::invalid_request(VALIDATION_FAILED).with_details(value.to_details())
    }
}
