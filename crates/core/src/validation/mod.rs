//! Form validation
//!
//! Each form collects every failing field before reporting, keeping only the
//! first message per field. Field names are the wire (camelCase) names so
//! errors line up with the payload the backend sees.

mod coupon;
mod tier;

pub use coupon::validate_coupon;
pub use tier::{validate_free_tier, validate_paid_tier};

use serde::Serialize;
use std::fmt;

/// One failing field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All field errors for one form submission, in form order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error unless the field already has one
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.fields.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.fields.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.fields {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Check a required number, returning it only when present and finite
pub(crate) fn required_number(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<f64>,
    required_message: &str,
) -> Option<f64> {
    match value {
        None => {
            errors.add(field, required_message);
            None
        }
        Some(v) if !v.is_finite() => {
            errors.add(field, format!("{} must be a number", field));
            None
        }
        Some(v) => Some(v),
    }
}

pub(crate) fn required_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    required_message: &str,
) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, required_message);
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("tierName", "Tier Name is required");
        errors.add("tierName", "something else");
        errors.add("colour", "Enter a valid hex color");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("tierName"), Some("Tier Name is required"));
        assert_eq!(
            errors.to_string(),
            "tierName: Tier Name is required; colour: Enter a valid hex color"
        );
    }
}
