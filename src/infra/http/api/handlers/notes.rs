//! Notes handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::content::notes::{CreateNoteCommand, UpdateNoteCommand};

use super::content_to_api;
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::models::*;
use crate::infra::http::api::state::ApiState;

pub async fn create_note(
    State(state): State<ApiState>,
    Json(payload): Json<NoteCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let command = CreateNoteCommand {
        author_id: payload.author_id,
        title: payload.title,
        content: payload.content,
    };

    let note = state
        .notes
        .create_note(command)
        .await
        .map_err(content_to_api)?;

    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn update_note(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(payload): Json<NoteUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let command = UpdateNoteCommand {
        id,
        title: payload.title,
        content: payload.content,
    };

    let note = state
        .notes
        .update_note(command)
        .await
        .map_err(content_to_api)?;

    Ok(Json(note))
}
