//! Inference Engine Implementation

use crate::artifact::ModelArtifact;
use crate::InferenceError;
use data_validator::Validator;
use feature_engine::{Coverage, FeatureEncoder, FeatureSchema, FeatureVector};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};
use video_metrics::VideoMetrics;

/// Black-box regressor over a feature row in schema order
pub trait Predictor: Send + Sync {
    /// Short model family name for logs and health output
    fn kind(&self) -> &'static str;

    /// Number of inputs the model takes, if it declares one
    fn input_width(&self) -> Option<usize>;

    /// Estimate revenue for one row
    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError>;
}

/// Result of one estimate
#[derive(Debug, Clone, Serialize)]
pub struct RevenueEstimate {
    /// Estimated ad revenue in USD
    pub revenue: f64,
    /// Row that was fed to the model
    pub features: FeatureVector,
    /// Encode + predict latency in microseconds
    pub latency_us: u64,
}

impl RevenueEstimate {
    /// Currency display with two decimals, e.g. `$12.34` (sign kept: `$-3.20`)
    pub fn display(&self) -> String {
        format!("${:.2}", self.revenue)
    }
}

impl fmt::Display for RevenueEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.revenue)
    }
}

/// Validate → encode → predict pipeline around one loaded model.
///
/// Built once at start-up and read-only afterwards, so a single instance
/// can be shared across request handlers.
pub struct InferenceEngine {
    encoder: FeatureEncoder,
    predictor: Box<dyn Predictor>,
    validator: Validator,
    coverage: Coverage,
}

impl InferenceEngine {
    /// Pair a schema with a predictor, checking their widths agree
    pub fn new(schema: FeatureSchema, predictor: Box<dyn Predictor>) -> Result<Self, InferenceError> {
        if let Some(width) = predictor.input_width() {
            if width != schema.len() {
                return Err(InferenceError::ArtifactMismatch {
                    expected: schema.len(),
                    actual: width,
                });
            }
        }

        let encoder = FeatureEncoder::new(schema);
        let coverage = encoder.coverage();
        if !coverage.unproducible.is_empty() {
            warn!(
                "Model expects {} column(s) the form never produces, they will always be 0: {:?}",
                coverage.unproducible.len(),
                coverage.unproducible
            );
        }
        if !coverage.unmatched_options.is_empty() {
            warn!(
                "Form options without a model column (encoded as all zeros): {:?}",
                coverage.unmatched_options
            );
        }

        info!(
            "Inference engine ready: {} model over {} features",
            predictor.kind(),
            encoder.schema().len()
        );

        Ok(Self {
            encoder,
            predictor,
            validator: Validator::default(),
            coverage,
        })
    }

    /// Build from a parsed artifact
    pub fn from_artifact(artifact: &ModelArtifact, base_dir: &Path) -> Result<Self, InferenceError> {
        let schema = artifact.schema()?;
        let predictor = artifact.predictor(base_dir)?;
        Self::new(schema, predictor)
    }

    /// Load an artifact file; everything that can be wrong with it fails here
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        let artifact = ModelArtifact::from_path(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_artifact(&artifact, base_dir)
    }

    /// Replace the default input ranges
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Estimate revenue for one submission
    pub fn estimate(&self, metrics: &VideoMetrics) -> Result<RevenueEstimate, InferenceError> {
        let start = std::time::Instant::now();

        self.validator
            .validate(metrics)
            .into_result()
            .map_err(InferenceError::InvalidInput)?;

        let features = self.encoder.encode(metrics);
        let revenue = self.predictor.predict(features.as_slice())?;
        if !revenue.is_finite() {
            return Err(InferenceError::InferenceFailed(format!(
                "model returned non-finite value {revenue}"
            )));
        }

        let latency_us = start.elapsed().as_micros() as u64;
        debug!("Estimated ${:.2} in {}us", revenue, latency_us);

        Ok(RevenueEstimate {
            revenue,
            features,
            latency_us,
        })
    }

    /// Feature schema of the loaded model
    pub fn schema(&self) -> &FeatureSchema {
        self.encoder.schema()
    }

    /// Load-time comparison of schema and form
    pub fn coverage(&self) -> &Coverage {
        &self.coverage
    }

    /// Model family name
    pub fn model_kind(&self) -> &'static str {
        self.predictor.kind()
    }

    /// Active input ranges
    pub fn validator(&self) -> &Validator {
        &self.validator
    }
}
