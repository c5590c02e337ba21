use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

use crate::application::content::creators::UpsertCreatorProfileCommand;

use super::content_to_api;
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::models::CreatorProfileRequest;
use crate::infra::http::api::state::ApiState;

pub async fn upsert_creator_profile(
    State(state): State<ApiState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<CreatorProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let command = UpsertCreatorProfileCommand {
        user_id,
        display_name: payload.display_name,
        bio: payload.bio,
        expertise: payload.expertise,
    };

    let profile = state
        .creators
        .upsert_profile(command)
        .await
        .map_err(content_to_api)?;

    Ok(Json(profile))
}
