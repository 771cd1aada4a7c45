use crate::field::FieldKind;
use thiserror::Error;

/// Crate specific Errors implementation.
///
/// Every variant is either a format error (the text isn't shaped like a cron expression)
/// or a range error (the shape is fine, but a number is outside of its field's bounds),
/// see [`is_format_error`](CronError::is_format_error) and [`is_range_error`](CronError::is_range_error).
#[derive(Debug, Error, Clone, PartialEq, Eq, Hash)]
pub enum CronError {
    /// Expression is empty or contains whitespaces only.
    #[error("empty cron expression")]
    EmptyExpression,
    /// Expression doesn't consist of exactly six fields.
    #[error("invalid cron expression '{expression}': expected 6 fields, found {found}")]
    InvalidFieldCount {
        /// Offending expression.
        expression: String,
        /// Number of whitespace separated fields found.
        found: usize,
    },
    /// Field contains unexpected characters or has a malformed structure.
    #[error("invalid {field} field '{value}': {reason}")]
    InvalidFormat {
        /// Field the error belongs to.
        field: FieldKind,
        /// Offending field text.
        value: String,
        /// Human-readable explanation.
        reason: String,
    },
    /// Numeric value is outside of the field's valid bounds.
    #[error("{field} value out of range in '{value}': {reason}")]
    OutOfRange {
        /// Field the error belongs to.
        field: FieldKind,
        /// Offending field text.
        value: String,
        /// Human-readable explanation.
        reason: String,
    },
}

impl CronError {
    /// Returns `true` if the expression text is malformed.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyExpression | Self::InvalidFieldCount { .. } | Self::InvalidFormat { .. }
        )
    }

    /// Returns `true` if some numeric literal is outside of its bounds.
    pub fn is_range_error(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }

    pub(crate) fn format(field: FieldKind, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field,
            value: value.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn range(field: FieldKind, value: &str, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            field,
            value: value.to_owned(),
            reason: reason.into(),
        }
    }
}
