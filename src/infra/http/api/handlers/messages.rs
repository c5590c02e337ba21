use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::content::messages::SendMessageCommand;

use super::content_to_api;
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::models::MessageCreateRequest;
use crate::infra::http::api::state::ApiState;

pub async fn send_message(
    State(state): State<ApiState>,
    Json(payload): Json<MessageCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let command = SendMessageCommand {
        sender_id: payload.sender_id,
        recipient_id: payload.recipient_id,
        content: payload.content,
        spirit_post_id: payload.spirit_post_id,
    };

    let message = state
        .messages
        .send_message(command)
        .await
        .map_err(content_to_api)?;

    Ok((StatusCode::CREATED, Json(message)))
}
