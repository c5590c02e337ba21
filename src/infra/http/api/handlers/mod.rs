//! API handlers organized by resource type.
//!
//! Helper functions for error conversion are defined here and shared across modules.

mod creators;
mod messages;
mod moderation;
mod notes;
mod posts;
mod resources;
mod sensitive_words;
mod spirit_posts;

// Re-export all handlers for external use
pub use creators::*;
pub use messages::*;
pub use moderation::*;
pub use notes::*;
pub use posts::*;
pub use resources::*;
pub use sensitive_words::*;
pub use spirit_posts::*;

// ----- Shared error conversions -----

use axum::http::StatusCode;

use crate::application::admin::sensitive_words::AdminSensitiveWordError;
use crate::application::content::ContentError;
use crate::application::moderation::ModerationError;
use crate::application::repos::RepoError;

use super::error::{ApiError, codes};

pub(crate) fn repo_to_api(err: RepoError) -> ApiError {
    match err {
        RepoError::Duplicate { constraint } => ApiError::new(
            StatusCode::CONFLICT,
            codes::DUPLICATE,
            "Duplicate record",
            Some(constraint),
        ),
        RepoError::NotFound => ApiError::not_found("resource not found"),
        RepoError::InvalidInput { message } => ApiError::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_INPUT,
            "Invalid input",
            Some(message),
        ),
        RepoError::Integrity { message } => ApiError::new(
            StatusCode::CONFLICT,
            codes::INTEGRITY,
            "Integrity constraint violated",
            Some(message),
        ),
        RepoError::Timeout => ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            codes::DB_TIMEOUT,
            "Database timeout",
            None,
        ),
        RepoError::Persistence(msg) => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::REPO,
            "Persistence error",
            Some(msg),
        ),
    }
}

pub(crate) fn moderation_to_api(err: ModerationError) -> ApiError {
    match err {
        ModerationError::Rejected { matched_words } => ApiError::sensitive_content(matched_words),
    }
}

pub(crate) fn word_to_api(err: AdminSensitiveWordError) -> ApiError {
    match err {
        AdminSensitiveWordError::Validation(domain) => ApiError::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_INPUT,
            "Invalid sensitive word",
            Some(domain.to_string()),
        ),
        AdminSensitiveWordError::Conflict { word } => ApiError::new(
            StatusCode::CONFLICT,
            codes::DUPLICATE,
            "Sensitive word already exists",
            Some(word),
        ),
        AdminSensitiveWordError::NotFound { .. } => ApiError::not_found("sensitive word not found"),
        AdminSensitiveWordError::Repo(repo) => repo_to_api(repo),
    }
}

pub(crate) fn content_to_api(err: ContentError) -> ApiError {
    match err {
        ContentError::ConstraintViolation(field) => ApiError::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_INPUT,
            "Invalid content",
            Some(field.to_string()),
        ),
        ContentError::Rejected(moderation) => moderation_to_api(moderation),
        ContentError::NotFound => ApiError::not_found("content not found"),
        ContentError::AlreadyClaimed => ApiError::new(
            StatusCode::CONFLICT,
            codes::ALREADY_CLAIMED,
            "Spirit post already claimed",
            None,
        ),
        ContentError::Repo(repo) => repo_to_api(repo),
    }
}
