//! Validation Error Types

use thiserror::Error;

/// Errors during data validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// NaN or infinite measurement
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::OutOfRange { field, .. } => field,
            ValidationError::NotFinite { field } => field,
        }
    }
}
