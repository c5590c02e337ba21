//! Rules for banned words as stored in the word store.

use super::error::DomainError;

/// Accept an administrator-supplied word exactly as written.
///
/// Padding is part of the word: `" ass "` only matches the standalone form.
/// A word made of nothing but whitespace would match almost any text, so it
/// is rejected along with the empty string.
pub fn validate_word(raw: &str) -> Result<&str, DomainError> {
    if raw.trim().is_empty() {
        return Err(DomainError::blank("word"));
    }
    Ok(raw)
}
