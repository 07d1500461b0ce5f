//! Inventory errors
//!
//! Two kinds of failure exist in the model:
//! - **Validation**: malformed input rejected at the point it is supplied
//!   (empty string, non-positive integer, wrong shape, unknown entity)
//! - **Invariant violation**: a structural rule would break (an item left
//!   with zero boxes)

use thiserror::Error;

/// Result alias used across the inventory model
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Malformed input to a constructor, setter or query
///
/// The message always carries the field or method that rejected the input
/// and the offending value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{context}: {reason} (got {value})")]
pub struct ValidationError {
    context: String,
    value: String,
    reason: String,
}

impl ValidationError {
    /// Create a validation error for `context` (field or method name)
    pub fn new(
        context: impl Into<String>,
        value: impl std::fmt::Debug,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            context: context.into(),
            value: format!("{:?}", value),
            reason: reason.into(),
        }
    }

    /// Field or method name that rejected the input
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Debug rendering of the offending value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// What was expected
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Errors raised by the inventory model
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("item must have at least one box (item '{item_name}', id {item_id})")]
    InvariantViolation { item_name: String, item_id: i64 },
}

impl InventoryError {
    /// Shorthand for building a [`InventoryError::Validation`]
    pub(crate) fn validation(
        context: impl Into<String>,
        value: impl std::fmt::Debug,
        reason: impl Into<String>,
    ) -> Self {
        InventoryError::Validation(ValidationError::new(context, value, reason))
    }

    /// True for malformed-input failures
    pub fn is_validation(&self) -> bool {
        matches!(self, InventoryError::Validation(_))
    }

    /// True for rejected structural changes
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, InventoryError::InvariantViolation { .. })
    }
}

// ========================================================================
// Shared field checks
// ========================================================================

/// Require a strictly positive integer
pub(crate) fn require_positive(context: &str, value: i64) -> InventoryResult<i64> {
    if value <= 0 {
        return Err(InventoryError::validation(
            context,
            value,
            "must be a positive integer",
        ));
    }
    Ok(value)
}

/// Require a non-empty string, stored as given
pub(crate) fn require_non_empty(context: &str, value: &str) -> InventoryResult<String> {
    if value.is_empty() {
        return Err(InventoryError::validation(
            context,
            value,
            "must be a non-empty string",
        ));
    }
    Ok(value.to_string())
}

/// Require a string that is non-empty after trimming; returns the trimmed form
pub(crate) fn require_trimmed(context: &str, value: &str) -> InventoryResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InventoryError::validation(
            context,
            value,
            "must be a non-empty string",
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field_and_value() {
        let err = require_positive("ItemBox.qty", -3).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("ItemBox.qty"));
        assert!(msg.contains("-3"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_require_trimmed_strips_whitespace() {
        assert_eq!(require_trimmed("Item.collection", "  tools ").unwrap(), "tools");
        assert!(require_trimmed("Item.collection", "   ").is_err());
    }

    #[test]
    fn test_require_non_empty_keeps_whitespace() {
        assert_eq!(require_non_empty("ItemBox.description", " a ").unwrap(), " a ");
        assert!(require_non_empty("ItemBox.description", "").is_err());
    }

    #[test]
    fn test_invariant_violation_is_distinct() {
        let err = InventoryError::InvariantViolation {
            item_name: "bolt".to_string(),
            item_id: 7,
        };
        assert!(err.is_invariant_violation());
        assert!(!err.is_validation());
        assert!(err.to_string().contains("at least one box"));
    }
}
