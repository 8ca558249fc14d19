use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;
use vdiff_engine::{JsonDiffReport, JsonNode, SimilarityReport, TextDiffReport};

use crate::error::{ServerError, ServerResult};
use crate::router::AppState;

/// Body of `POST /diff`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TextDiffRequest {
    pub text1: String,
    pub text2: String,
    /// Falls back to the server's configured default when absent.
    pub context_lines: Option<i64>,
}

/// Body of `POST /json-diff`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsonDiffRequest {
    pub json1: JsonNode,
    pub json2: JsonNode,
}

/// Body of `POST /similarity`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimilarityRequest {
    pub text1: String,
    pub text2: String,
}

/// Service description.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "name": "vdiff",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "POST /diff - Compare two texts",
            "POST /json-diff - Compare two JSON objects",
            "POST /similarity - Calculate text similarity"
        ]
    }))
}

/// Health check handler.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

pub async fn text_diff_handler(
    State(state): State<AppState>,
    Json(req): Json<TextDiffRequest>,
) -> ServerResult<Json<TextDiffReport>> {
    let context = req.context_lines.unwrap_or(state.default_context_lines);
    debug!(
        text1_bytes = req.text1.len(),
        text2_bytes = req.text2.len(),
        context,
        "text diff request"
    );
    let report = blocking(move || vdiff_engine::diff_text(&req.text1, &req.text2, context)).await??;
    Ok(Json(report))
}

pub async fn json_diff_handler(
    Json(req): Json<JsonDiffRequest>,
) -> ServerResult<Json<JsonDiffReport>> {
    debug!(
        json1 = %req.json1.kind(),
        json2 = %req.json2.kind(),
        "json diff request"
    );
    let report = blocking(move || vdiff_engine::diff_json(&req.json1, &req.json2)).await?;
    Ok(Json(report))
}

pub async fn similarity_handler(
    Json(req): Json<SimilarityRequest>,
) -> ServerResult<Json<SimilarityReport>> {
    debug!(
        text1_bytes = req.text1.len(),
        text2_bytes = req.text2.len(),
        "similarity request"
    );
    let report = blocking(move || vdiff_engine::similarity(&req.text1, &req.text2)).await?;
    Ok(Json(report))
}

// Alignment is CPU-bound; keep it off the async workers.
async fn blocking<T, F>(f: F) -> ServerResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))
}
