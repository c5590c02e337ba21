use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Request, header::AUTHORIZATION};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;
use tracing::warn;

use super::error::ApiError;
use super::state::ApiState;

/// Require `Authorization: Bearer <token>` matching the configured admin token.
pub async fn admin_auth(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(expected) = state.admin_token.as_deref() else {
        warn!(
            target = "linggan::api::auth",
            "admin request refused: no admin token configured"
        );
        return ApiError::unauthorized().into_response();
    };

    let Some(presented) = extract_token(request.headers().get(AUTHORIZATION)) else {
        return ApiError::unauthorized().into_response();
    };

    if !bool::from(presented.as_bytes().ct_eq(expected.as_bytes())) {
        return ApiError::unauthorized().into_response();
    }

    next.run(request).await
}

fn extract_token(header: Option<&HeaderValue>) -> Option<&str> {
    let raw = header?.to_str().ok()?;
    raw.strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_prefix_is_required() {
        let header = HeaderValue::from_static("Bearer s3cret");
        assert_eq!(extract_token(Some(&header)), Some("s3cret"));

        let header = HeaderValue::from_static("Basic s3cret");
        assert_eq!(extract_token(Some(&header)), None);
        assert_eq!(extract_token(None), None);
    }
}
