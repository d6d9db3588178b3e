//! Field-level validation errors shared by model and request types.
//!
//! # Responsibility
//! - Collect every failing field instead of stopping at the first one.
//! - Keep client-facing messages stable across model and request checks.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub(crate) const FRANCHISE_NAME_REQUIRED: &str = "The franchise name is required";
pub(crate) const BRANCH_NAME_REQUIRED: &str = "Branch name is required";
pub(crate) const PRODUCT_NAME_REQUIRED: &str = "Product name is required";
pub(crate) const NAME_REQUIRED: &str = "The name is required";
pub(crate) const STOCK_REQUIRED: &str = "Stock is required";
pub(crate) const STOCK_NEGATIVE: &str = "Stock cannot be negative";
pub(crate) const STOCK_TOO_LARGE: &str = "Stock is too large";

/// One rejected field with its client-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Field path, e.g. `name` or `branches[0].products[2].name`.
    pub field: String,
    pub message: String,
}

/// Validation failure carrying at least one field violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Builds an error for a single field.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation {
                field: field.into(),
                message: message.into(),
            }],
        }
    }

    /// Returns `Ok(())` when no violation was collected.
    pub(crate) fn check(violations: Vec<FieldViolation>) -> Result<(), Self> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self { violations })
        }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Whether any violation targets `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|violation| violation.field == field)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for violation in &self.violations {
            if !first {
                f.write_str("; ")?;
            }
            f.write_str(&violation.message)?;
            first = false;
        }
        Ok(())
    }
}

impl Error for ValidationError {}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) fn push_if_blank(
    violations: &mut Vec<FieldViolation>,
    field: impl Into<String>,
    value: &str,
    message: &str,
) {
    if is_blank(value) {
        violations.push(FieldViolation {
            field: field.into(),
            message: message.to_string(),
        });
    }
}

/// Accepts `value` unchanged unless it is blank.
pub(crate) fn require_name(value: String, message: &str) -> Result<String, ValidationError> {
    if is_blank(&value) {
        return Err(ValidationError::single("name", message));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{is_blank, require_name, FieldViolation, ValidationError};

    #[test]
    fn blank_detection_trims_whitespace() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn display_joins_messages_in_order() {
        let err = ValidationError::check(vec![
            FieldViolation {
                field: "name".to_string(),
                message: "first".to_string(),
            },
            FieldViolation {
                field: "stock".to_string(),
                message: "second".to_string(),
            },
        ])
        .unwrap_err();
        assert_eq!(err.to_string(), "first; second");
        assert!(err.has_field("stock"));
    }

    #[test]
    fn require_name_keeps_original_text() {
        assert_eq!(require_name("  Main  ".to_string(), "x").unwrap(), "  Main  ");
        let err = require_name("   ".to_string(), "x").unwrap_err();
        assert_eq!(err.violations()[0].field, "name");
    }
}
