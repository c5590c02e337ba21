//! Spirit post handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::content::spirit_posts::{
    CreateSpiritPostCommand, UpdateSpiritPostCommand,
};

use super::content_to_api;
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::models::*;
use crate::infra::http::api::state::ApiState;

pub async fn create_spirit_post(
    State(state): State<ApiState>,
    Json(payload): Json<SpiritPostCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let command = CreateSpiritPostCommand {
        author_id: payload.author_id,
        title: payload.title,
        content: payload.content,
        reward: payload.reward,
    };

    let post = state
        .spirit_posts
        .create_spirit_post(command)
        .await
        .map_err(content_to_api)?;

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_spirit_post(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(payload): Json<SpiritPostUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let command = UpdateSpiritPostCommand {
        id,
        title: payload.title,
        content: payload.content,
        reward: payload.reward,
    };

    let post = state
        .spirit_posts
        .update_spirit_post(command)
        .await
        .map_err(content_to_api)?;

    Ok(Json(post))
}

pub async fn claim_spirit_post(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(payload): Json<SpiritPostClaimRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state
        .spirit_posts
        .claim_spirit_post(id, payload.claimant_id)
        .await
        .map_err(content_to_api)?;

    Ok(Json(post))
}
