//! Posts handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::content::posts::{CreatePostCommand, UpdatePostCommand};

use super::content_to_api;
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::models::*;
use crate::infra::http::api::state::ApiState;

pub async fn create_post(
    State(state): State<ApiState>,
    Json(payload): Json<PostCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let command = CreatePostCommand {
        author_id: payload.author_id,
        title: payload.title,
        content: payload.content,
        prompt: payload.prompt,
    };

    let post = state
        .posts
        .create_post(command)
        .await
        .map_err(content_to_api)?;

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(payload): Json<PostUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let command = UpdatePostCommand {
        id,
        title: payload.title,
        content: payload.content,
        prompt: payload.prompt,
    };

    let post = state
        .posts
        .update_post(command)
        .await
        .map_err(content_to_api)?;

    Ok(Json(post))
}
