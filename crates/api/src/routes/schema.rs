//! Schema Routes

use axum::{extract::State, Json};
use feature_engine::Coverage;
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

/// Response for the schema endpoint
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    /// Feature columns in model order
    pub columns: Vec<String>,
    pub count: usize,
    /// Columns and options that never meet
    pub coverage: Coverage,
}

/// Get the loaded model's feature schema
pub async fn get_schema(State(state): State<Arc<AppState>>) -> Json<SchemaResponse> {
    let schema = state.engine.schema();
    Json(SchemaResponse {
        columns: schema.columns().to_vec(),
        count: schema.len(),
        coverage: state.engine.coverage().clone(),
    })
}
