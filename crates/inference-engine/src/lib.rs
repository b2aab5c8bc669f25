//! Revenue Inference Engine
//!
//! Loads a model artifact once at start-up and turns validated video metrics
//! into an ad revenue estimate. Linear models are applied directly; exported
//! ensembles run through tract-onnx.

mod artifact;
mod engine;
mod linear;
mod onnx;

pub use artifact::{ModelArtifact, ModelSpec};
pub use engine::{InferenceEngine, Predictor, RevenueEstimate};
pub use linear::LinearModel;
pub use onnx::OnnxModel;

use data_validator::ValidationError;
use feature_engine::SchemaError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading a model or producing an estimate
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid feature schema: {0}")]
    Schema(#[from] SchemaError),
    #[error("Model artifact mismatch: schema has {expected} columns, model takes {actual}")]
    ArtifactMismatch { expected: usize, actual: usize },
    #[error("Model parameter {0} is not a finite number")]
    NonFiniteParameter(String),
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
    #[error("Invalid input: {}", join_errors(.0))]
    InvalidInput(Vec<ValidationError>),
}

impl InferenceError {
    /// True for errors caused by the submitted record rather than the model
    pub fn is_client_error(&self) -> bool {
        matches!(self, InferenceError::InvalidInput(_))
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
