//! Model Artifact
//!
//! JSON document produced by the training side:
//!
//! ```json
//! {
//!   "features": ["views", "likes", "category_Gaming"],
//!   "model": { "type": "linear", "coefficients": [0.001, 0.01, 2.5], "intercept": 1.2 }
//! }
//! ```
//!
//! An exported ensemble uses `{ "type": "onnx", "path": "forest.onnx" }`,
//! the path being relative to the artifact file.

use crate::engine::Predictor;
use crate::linear::LinearModel;
use crate::onnx::OnnxModel;
use crate::InferenceError;
use feature_engine::FeatureSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Predictor half of the artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSpec {
    /// Fitted linear regression
    Linear { coefficients: Vec<f64>, intercept: f64 },
    /// Opaque regressor exported to ONNX
    Onnx { path: PathBuf },
}

/// Parsed but not yet validated model artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Column order the model was trained on
    pub features: Vec<String>,
    pub model: ModelSpec,
}

impl ModelArtifact {
    /// Parse an artifact from JSON text
    pub fn from_json(json: &str) -> Result<Self, InferenceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse an artifact file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| InferenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Read model artifact {} ({} bytes)", path.display(), json.len());
        Self::from_json(&json)
    }

    /// Validated feature schema
    pub fn schema(&self) -> Result<FeatureSchema, InferenceError> {
        Ok(FeatureSchema::new(self.features.iter().cloned())?)
    }

    /// Build the predictor; relative ONNX paths resolve against `base_dir`
    pub fn predictor(&self, base_dir: &Path) -> Result<Box<dyn Predictor>, InferenceError> {
        match &self.model {
            ModelSpec::Linear {
                coefficients,
                intercept,
            } => {
                if coefficients.len() != self.features.len() {
                    return Err(InferenceError::ArtifactMismatch {
                        expected: self.features.len(),
                        actual: coefficients.len(),
                    });
                }
                Ok(Box::new(LinearModel::new(coefficients.clone(), *intercept)?))
            }
            ModelSpec::Onnx { path } => {
                let path = if path.is_absolute() {
                    path.clone()
                } else {
                    base_dir.join(path)
                };
                Ok(Box::new(OnnxModel::load(path, self.features.len())?))
            }
        }
    }
}
