pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod state;

pub use state::ApiState;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
};

/// Routes under `/api/v1`. Admin routes and the dry-run check, which reveals
/// matched words, sit behind the bearer-token check.
pub fn build_api_router(state: ApiState) -> Router<ApiState> {
    let admin_routes = Router::new()
        .route(
            "/api/v1/admin/sensitive-words",
            get(handlers::list_sensitive_words).post(handlers::add_sensitive_word),
        )
        .route(
            "/api/v1/admin/sensitive-words/refresh",
            post(handlers::refresh_sensitive_words),
        )
        .route(
            "/api/v1/admin/sensitive-words/{id}",
            delete(handlers::remove_sensitive_word),
        )
        .route("/api/v1/moderation/check", post(handlers::check_texts))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::admin_auth,
        ));

    let content_routes = Router::new()
        .route("/api/v1/posts", post(handlers::create_post))
        .route("/api/v1/posts/{id}", patch(handlers::update_post))
        .route("/api/v1/notes", post(handlers::create_note))
        .route("/api/v1/notes/{id}", patch(handlers::update_note))
        .route("/api/v1/spirit-posts", post(handlers::create_spirit_post))
        .route(
            "/api/v1/spirit-posts/{id}",
            patch(handlers::update_spirit_post),
        )
        .route(
            "/api/v1/spirit-posts/{id}/claim",
            post(handlers::claim_spirit_post),
        )
        .route("/api/v1/resources", post(handlers::create_resource))
        .route("/api/v1/resources/{id}", patch(handlers::update_resource))
        .route(
            "/api/v1/creators/{user_id}",
            put(handlers::upsert_creator_profile),
        )
        .route("/api/v1/messages", post(handlers::send_message));

    admin_routes.merge(content_routes)
}
