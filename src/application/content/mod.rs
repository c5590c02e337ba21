//! User-facing content services.
//!
//! Each service normalises its command, then writes through
//! [`ModerationGuard::guard`](crate::application::moderation::ModerationGuard::guard)
//! so screening always happens before persistence.

pub mod creators;
pub mod messages;
pub mod notes;
pub mod posts;
pub mod resources;
pub mod spirit_posts;

#[cfg(test)]
mod testing;

use thiserror::Error;

use crate::application::moderation::ModerationError;
use crate::application::repos::RepoError;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("invalid field `{0}`")]
    ConstraintViolation(&'static str),
    #[error(transparent)]
    Rejected(#[from] ModerationError),
    #[error("content not found")]
    NotFound,
    #[error("spirit post has already been claimed")]
    AlreadyClaimed,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Trim a required field, rejecting it when nothing is left.
pub(crate) fn required_text(value: String, field: &'static str) -> Result<String, ContentError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ContentError::ConstraintViolation(field));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional field, dropping it when blank.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Trim a field supplied in a partial update. A supplied field may not be blanked.
pub(crate) fn changed_text(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<String>, ContentError> {
    value.map(|value| required_text(value, field)).transpose()
}
