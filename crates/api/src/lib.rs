//! Ad Revenue Predictor API Server
//!
//! HTTP front end for the revenue model: describes the input form, accepts
//! submissions and returns formatted estimates.

use axum::{extract::State, http::header, response::IntoResponse, routing::{get, post}, Json, Router};
use inference_engine::InferenceEngine;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod error;
pub mod routes;
pub mod settings;
pub mod telemetry;

use data_validator::Validator;
use error::ApiError;
use settings::{ServerSettings, Settings};

/// Application state shared across handlers; read-only once built
pub struct AppState {
    /// Loaded model pipeline
    pub engine: InferenceEngine,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Prometheus exporter, when enabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state
    pub fn new(engine: InferenceEngine, metrics: Option<PrometheusHandle>) -> Self {
        Self {
            engine,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            metrics,
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: ModelStatus,
}

/// Loaded model summary
#[derive(Debug, Serialize)]
pub struct ModelStatus {
    pub kind: String,
    pub features: usize,
    /// Schema columns no submission can fill
    pub unproducible_columns: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>, server: &ServerSettings) -> Router {
    let router = Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/form", get(routes::form::get_form))
        .route("/api/v1/schema", get(routes::schema::get_schema))
        .route("/api/v1/predict", post(routes::predict::post_predict))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if server.cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: ModelStatus {
            kind: state.engine.model_kind().to_string(),
            features: state.engine.schema().len(),
            unproducible_columns: state.engine.coverage().unproducible.len(),
        },
    };

    Json(response)
}

/// Prometheus text exposition
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let handle = state.metrics.as_ref().ok_or(ApiError::MetricsDisabled)?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}

/// Load the model and serve until shutdown
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let engine = InferenceEngine::load(&settings.model.artifact_path)?
        .with_validator(Validator::new(settings.validation.clone()));

    let metrics = if settings.metrics.enabled {
        Some(telemetry::install_prometheus()?)
    } else {
        None
    };

    let state = Arc::new(AppState::new(engine, metrics));
    let app = create_router(state, &settings.server);

    info!("Starting API server on {}", settings.server.addr);

    let listener = tokio::net::TcpListener::bind(&settings.server.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
