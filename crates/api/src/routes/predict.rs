//! Prediction Route

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use feature_engine::EncodingReport;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use video_metrics::VideoMetrics;

use crate::error::ApiError;
use crate::{telemetry, AppState};

/// Response for the predict endpoint
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub request_id: Uuid,
    /// Estimated ad revenue (USD)
    pub revenue: f64,
    /// Revenue formatted for display, e.g. `$12.34`
    pub display: String,
    pub latency_us: u64,
    /// Schema gaps hit while encoding this submission
    pub warnings: Vec<String>,
    pub encoding: EncodingReport,
}

/// Estimate ad revenue for one submitted form
pub async fn post_predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<VideoMetrics>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(metrics) = payload?;
    let request_id = Uuid::new_v4();

    let estimate = match state.engine.estimate(&metrics) {
        Ok(estimate) => estimate,
        Err(e) => {
            warn!(%request_id, "Estimate failed: {}", e);
            telemetry::record_failure(&e);
            return Err(e.into());
        }
    };
    telemetry::record_estimate(&estimate);

    info!(
        %request_id,
        category = %metrics.category,
        device = %metrics.device,
        country = %metrics.country,
        "Estimated revenue {}",
        estimate
    );

    Ok(Json(PredictResponse {
        request_id,
        revenue: estimate.revenue,
        display: estimate.display(),
        latency_us: estimate.latency_us,
        warnings: estimate.features.report.warnings(),
        encoding: estimate.features.report,
    }))
}
