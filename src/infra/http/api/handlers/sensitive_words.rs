//! Admin handlers for the sensitive-word list.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::word_to_api;
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::models::*;
use crate::infra::http::api::state::ApiState;

pub async fn list_sensitive_words(State(state): State<ApiState>) -> impl IntoResponse {
    let words = state.sensitive_words.list_words().await;
    Json(SensitiveWordListResponse { words })
}

pub async fn add_sensitive_word(
    State(state): State<ApiState>,
    Json(payload): Json<SensitiveWordCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .sensitive_words
        .add_word(ApiState::ADMIN_ACTOR, &payload.word)
        .await
        .map_err(word_to_api)?;

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn remove_sensitive_word(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = state
        .sensitive_words
        .remove_word(ApiState::ADMIN_ACTOR, id)
        .await
        .map_err(word_to_api)?;

    Ok(Json(removed))
}

pub async fn refresh_sensitive_words(State(state): State<ApiState>) -> impl IntoResponse {
    Json(state.sensitive_words.refresh(ApiState::ADMIN_ACTOR).await)
}
