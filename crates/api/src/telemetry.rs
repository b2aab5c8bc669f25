//! Logging and Prometheus metrics

use crate::settings::LoggingSettings;
use inference_engine::{InferenceError, RevenueEstimate};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::subscriber::SetGlobalDefaultError;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

pub const PREDICTIONS_TOTAL: &str = "revenue_predictions_total";
pub const PREDICTION_ERRORS_TOTAL: &str = "revenue_prediction_errors_total";
pub const UNMATCHED_CATEGORY_TOTAL: &str = "revenue_unmatched_category_total";
pub const PREDICTION_LATENCY_SECONDS: &str = "revenue_prediction_latency_seconds";

/// Initialize logging
pub fn init_logging(settings: &LoggingSettings) -> Result<(), SetGlobalDefaultError> {
    let level = settings.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if settings.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    }
}

/// Install the global Prometheus recorder
pub fn install_prometheus() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(PREDICTIONS_TOTAL, "Revenue estimates served");
    describe_counter!(PREDICTION_ERRORS_TOTAL, "Estimates that failed, by reason");
    describe_counter!(
        UNMATCHED_CATEGORY_TOTAL,
        "Selected options with no model column, by column"
    );
    describe_histogram!(PREDICTION_LATENCY_SECONDS, "Encode and predict latency");

    Ok(handle)
}

/// Count a successful estimate
pub fn record_estimate(estimate: &RevenueEstimate) {
    counter!(PREDICTIONS_TOTAL).increment(1);
    histogram!(PREDICTION_LATENCY_SECONDS).record(estimate.latency_us as f64 / 1_000_000.0);
    for column in &estimate.features.report.unmatched_categories {
        counter!(UNMATCHED_CATEGORY_TOTAL, "column" => column.clone()).increment(1);
    }
}

/// Count a failed estimate
pub fn record_failure(error: &InferenceError) {
    let reason = if error.is_client_error() {
        "invalid_input"
    } else {
        "model"
    };
    counter!(PREDICTION_ERRORS_TOTAL, "reason" => reason).increment(1);
}
