use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::infra::http::api::models::ModerationCheckRequest;
use crate::infra::http::api::state::ApiState;

/// Dry-run screening: reports matches without writing anything.
pub async fn check_texts(
    State(state): State<ApiState>,
    Json(payload): Json<ModerationCheckRequest>,
) -> impl IntoResponse {
    let texts: Vec<&str> = payload.texts.iter().map(String::as_str).collect();
    Json(state.cache.check_multiple_texts(&texts).await)
}
