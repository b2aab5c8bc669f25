//! Data Validator for Range Checking

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use tracing::debug;
use video_metrics::VideoMetrics;

/// Number of numeric fields checked per record
const FIELD_COUNT: usize = 11;

/// Validation configuration (inclusive ranges)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Views, likes, comments and subscribers
    pub count_range: (f64, f64),
    /// Total watch time (minutes)
    pub watch_time_range: (f64, f64),
    /// Video length (minutes)
    pub video_length_range: (f64, f64),
    pub year_range: (f64, f64),
    pub month_range: (f64, f64),
    pub day_range: (f64, f64),
    pub hour_range: (f64, f64),
    /// 0 = Monday
    pub weekday_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            count_range: (0.0, f64::INFINITY),
            watch_time_range: (1.0, f64::INFINITY),
            video_length_range: (1.0, f64::INFINITY),
            year_range: (2020.0, 2030.0),
            month_range: (1.0, 12.0),
            day_range: (1.0, 31.0),
            hour_range: (0.0, 23.0),
            weekday_range: (0.0, 6.0),
        }
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(fields_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            fields_checked,
        }
    }

    /// Create an invalid result with errors
    pub fn invalid(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: false,
            errors,
            fields_checked,
        }
    }

    /// Convert into a `Result`, keeping every error
    pub fn into_result(self) -> Result<(), Vec<ValidationError>> {
        if self.valid {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Validator for submitted video metrics
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Active ranges
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field });
        }
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Check every numeric field, collecting all failures
    pub fn validate(&self, metrics: &VideoMetrics) -> ValidationResult {
        let c = &self.config;
        let checks = [
            ("views", metrics.views as f64, c.count_range),
            ("likes", metrics.likes as f64, c.count_range),
            ("comments", metrics.comments as f64, c.count_range),
            ("subscribers", metrics.subscribers as f64, c.count_range),
            ("watch_time_minutes", metrics.watch_time_minutes, c.watch_time_range),
            ("video_length_minutes", metrics.video_length_minutes, c.video_length_range),
            ("upload_year", f64::from(metrics.upload_year), c.year_range),
            ("upload_month", f64::from(metrics.upload_month), c.month_range),
            ("upload_day", f64::from(metrics.upload_day), c.day_range),
            ("upload_hour", f64::from(metrics.upload_hour), c.hour_range),
            ("upload_weekday", f64::from(metrics.upload_weekday), c.weekday_range),
        ];
        debug_assert_eq!(checks.len(), FIELD_COUNT);

        let errors: Vec<ValidationError> = checks
            .into_iter()
            .filter_map(|(field, value, range)| self.validate_range(field, value, range).err())
            .collect();

        if errors.is_empty() {
            ValidationResult::valid(FIELD_COUNT)
        } else {
            debug!("Rejected video metrics: {} invalid field(s)", errors.len());
            ValidationResult::invalid(errors, FIELD_COUNT)
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_form_defaults_are_valid() {
        let validator = Validator::default();
        let result = validator.validate(&VideoMetrics::default());
        assert!(result.valid);
        assert_eq!(result.fields_checked, FIELD_COUNT);
    }

    #[test]
    fn test_zero_counts_are_valid() {
        let validator = Validator::default();
        let metrics = VideoMetrics {
            views: 0,
            likes: 0,
            comments: 0,
            subscribers: 0,
            ..Default::default()
        };
        assert!(validator.validate(&metrics).valid);
    }

    #[test]
    fn test_month_range() {
        let validator = Validator::default();
        let c = validator.config().month_range;
        assert!(validator.validate_range("upload_month", 1.0, c).is_ok());
        assert!(validator.validate_range("upload_month", 12.0, c).is_ok());
        assert!(validator.validate_range("upload_month", 0.0, c).is_err());
        assert!(validator.validate_range("upload_month", 13.0, c).is_err());
    }

    #[test]
    fn test_collects_every_error() {
        let validator = Validator::default();
        let metrics = VideoMetrics {
            upload_month: 13,
            upload_hour: 24,
            watch_time_minutes: 0.5,
            ..Default::default()
        };
        let result = validator.validate(&metrics);
        assert!(!result.valid);
        let fields: Vec<_> = result.errors.iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["watch_time_minutes", "upload_month", "upload_hour"]);
    }

    #[test]
    fn test_non_finite_rejected() {
        let validator = Validator::default();
        let metrics = VideoMetrics {
            video_length_minutes: f64::NAN,
            ..Default::default()
        };
        let errors = validator.validate(&metrics).into_result().unwrap_err();
        assert_eq!(errors, vec![ValidationError::NotFinite { field: "video_length_minutes" }]);
    }

    #[test]
    fn test_error_message() {
        let err = ValidationError::OutOfRange {
            field: "upload_weekday",
            value: 7.0,
            min: 0.0,
            max: 6.0,
        };
        assert_eq!(err.to_string(), "upload_weekday value 7 is out of range [0, 6]");
    }

    proptest! {
        #[test]
        fn weekday_accepted_iff_in_range(weekday in 0u8..=255) {
            let validator = Validator::default();
            let metrics = VideoMetrics { upload_weekday: weekday, ..Default::default() };
            prop_assert_eq!(validator.validate(&metrics).valid, weekday <= 6);
        }
    }
}
