//! Resource handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::content::resources::{CreateResourceCommand, UpdateResourceCommand};

use super::content_to_api;
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::models::*;
use crate::infra::http::api::state::ApiState;

pub async fn create_resource(
    State(state): State<ApiState>,
    Json(payload): Json<ResourceCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let command = CreateResourceCommand {
        author_id: payload.author_id,
        title: payload.title,
        description: payload.description,
        url: payload.url,
    };

    let resource = state
        .resources
        .create_resource(command)
        .await
        .map_err(content_to_api)?;

    Ok((StatusCode::CREATED, Json(resource)))
}

pub async fn update_resource(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(payload): Json<ResourceUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let command = UpdateResourceCommand {
        id,
        title: payload.title,
        description: payload.description,
        url: payload.url,
    };

    let resource = state
        .resources
        .update_resource(command)
        .await
        .map_err(content_to_api)?;

    Ok(Json(resource))
}
