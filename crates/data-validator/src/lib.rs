//! Data Validation
//!
//! Range checking for submitted video metrics, mirroring the min/max
//! constraints of the input form.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{Validator, ValidationConfig, ValidationResult};
