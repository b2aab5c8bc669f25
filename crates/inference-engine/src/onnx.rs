//! ONNX Revenue Model
//!
//! Runs an exported regressor (e.g. a tree ensemble) through tract. The
//! model takes one `f32` row of shape `[1, n]` and its first output holds the
//! estimate.

use crate::engine::Predictor;
use crate::InferenceError;
use std::path::{Path, PathBuf};
use tracing::info;
use tract_onnx::prelude::*;

type OnnxPlan = TypedRunnableModel<TypedModel>;

/// Optimized, ready-to-run ONNX regressor
pub struct OnnxModel {
    plan: OnnxPlan,
    width: usize,
    path: PathBuf,
}

impl OnnxModel {
    /// Load and optimize a model expecting `width` input columns
    pub fn load(path: impl AsRef<Path>, width: usize) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        info!("Loading ONNX model from {} ({} inputs)", path.display(), width);

        let plan = build_plan(path, width)
            .map_err(|e| InferenceError::ModelLoadError(format!("{}: {e:#}", path.display())))?;

        info!("ONNX model loaded successfully");
        Ok(Self {
            plan,
            width,
            path: path.to_path_buf(),
        })
    }

    /// File the model was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn build_plan(path: &Path, width: usize) -> TractResult<OnnxPlan> {
    tract_onnx::onnx()
        .model_for_path(path)?
        .with_input_fact(0, f32::fact([1, width]).into())?
        .into_optimized()?
        .into_runnable()
}

fn run_plan(plan: &OnnxPlan, features: &[f64]) -> TractResult<f64> {
    let row: Vec<f32> = features.iter().map(|&v| v as f32).collect();
    let input: Tensor = tract_ndarray::Array2::from_shape_vec((1, row.len()), row)?.into();
    let outputs = plan.run(tvec!(input.into()))?;
    let view = outputs[0].to_array_view::<f32>()?;
    view.iter()
        .next()
        .map(|&v| f64::from(v))
        .ok_or_else(|| anyhow::anyhow!("model produced an empty output"))
}

impl Predictor for OnnxModel {
    fn kind(&self) -> &'static str {
        "onnx"
    }

    fn input_width(&self) -> Option<usize> {
        Some(self.width)
    }

    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        if features.len() != self.width {
            return Err(InferenceError::InvalidInputShape {
                expected: self.width,
                actual: features.len(),
            });
        }
        run_plan(&self.plan, features).map_err(|e| InferenceError::InferenceFailed(format!("{e:#}")))
    }
}
