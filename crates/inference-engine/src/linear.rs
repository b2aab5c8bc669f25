//! Linear Revenue Model

use crate::engine::Predictor;
use crate::InferenceError;

/// Fitted linear regression: `dot(features, coefficients) + intercept`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    /// Create a model, rejecting NaN or infinite parameters
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, InferenceError> {
        if let Some(i) = coefficients.iter().position(|c| !c.is_finite()) {
            return Err(InferenceError::NonFiniteParameter(format!("coefficients[{i}]")));
        }
        if !intercept.is_finite() {
            return Err(InferenceError::NonFiniteParameter("intercept".to_string()));
        }
        Ok(Self {
            coefficients,
            intercept,
        })
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Predictor for LinearModel {
    fn kind(&self) -> &'static str {
        "linear"
    }

    fn input_width(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }

    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        if features.len() != self.coefficients.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }
        let dot: f64 = features
            .iter()
            .zip(&self.coefficients)
            .map(|(x, w)| x * w)
            .sum();
        Ok(dot + self.intercept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_plus_intercept() {
        let model = LinearModel::new(vec![0.5, -2.0, 0.001], 3.0).unwrap();
        let y = model.predict(&[4.0, 1.0, 1000.0]).unwrap();
        assert!((y - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_intercept_only_on_zero_row() {
        let model = LinearModel::new(vec![1.0, 2.0], -7.25).unwrap();
        assert_eq!(model.predict(&[0.0, 0.0]).unwrap(), -7.25);
    }

    #[test]
    fn test_width_mismatch() {
        let model = LinearModel::new(vec![1.0, 2.0], 0.0).unwrap();
        let err = model.predict(&[1.0]).unwrap_err();
        assert!(matches!(
            err,
            InferenceError::InvalidInputShape { expected: 2, actual: 1 }
        ));
    }

    #[test]
    fn test_rejects_non_finite_parameters() {
        let err = LinearModel::new(vec![1.0, f64::NAN], 0.0).unwrap_err();
        assert!(matches!(err, InferenceError::NonFiniteParameter(ref p) if p == "coefficients[1]"));
        assert!(LinearModel::new(vec![1.0], f64::INFINITY).is_err());
    }
}
