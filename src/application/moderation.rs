//! Check-before-write screening of user-generated text.
//!
//! Every create/update command exposes its free-text fields through
//! [`ModeratedDraft`]. [`ModerationGuard::guard`] screens them and only then
//! hands the command to the write; a rejected command never reaches storage.

use std::future::Future;
use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use tracing::info;

use crate::cache::SensitiveWordCache;

/// A command whose free text must be screened before it is persisted.
pub trait ModeratedDraft: Send + Sync {
    /// Free-text fields carried by this command, in a stable order.
    ///
    /// Partial updates return only the fields they change.
    fn moderated_texts(&self) -> Vec<&str>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModerationError {
    #[error("content contains sensitive words: {}", .matched_words.join(", "))]
    Rejected { matched_words: Vec<String> },
}

impl ModerationError {
    pub fn matched_words(&self) -> &[String] {
        match self {
            Self::Rejected { matched_words } => matched_words,
        }
    }
}

#[derive(Clone)]
pub struct ModerationGuard {
    cache: Arc<SensitiveWordCache>,
}

impl ModerationGuard {
    pub fn new(cache: Arc<SensitiveWordCache>) -> Self {
        Self { cache }
    }

    /// Screen a draft without writing anything.
    pub async fn inspect<D>(&self, draft: &D) -> Result<(), ModerationError>
    where
        D: ModeratedDraft + ?Sized,
    {
        let texts = draft.moderated_texts();
        let result = self.cache.check_multiple_texts(&texts).await;
        if !result.is_sensitive {
            return Ok(());
        }

        counter!("linggan_moderation_rejected_total").increment(1);
        info!(
            target = "linggan::moderation",
            fields = texts.len(),
            matched = ?result.matched_words,
            "Rejected content containing sensitive words"
        );
        Err(ModerationError::Rejected {
            matched_words: result.matched_words,
        })
    }

    /// Screen `draft`, then pass it to `write` if it is clean.
    pub async fn guard<D, T, E, F, Fut>(&self, draft: D, write: F) -> Result<T, E>
    where
        D: ModeratedDraft,
        E: From<ModerationError>,
        F: FnOnce(D) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.inspect(&draft).await?;
        write(draft).await
    }
}
