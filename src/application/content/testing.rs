use std::sync::Arc;

use async_trait::async_trait;

use crate::application::moderation::ModerationGuard;
use crate::application::repos::{RepoError, SensitiveWordsRepo};
use crate::cache::{CacheConfig, ManualClock, SensitiveWordCache};
use crate::domain::entities::SensitiveWordRecord;

struct FixedWords(Vec<String>);

#[async_trait]
impl SensitiveWordsRepo for FixedWords {
    async fn list_all(&self) -> Result<Vec<SensitiveWordRecord>, RepoError> {
        Ok(self
            .0
            .iter()
            .enumerate()
            .map(|(index, word)| SensitiveWordRecord {
                id: index as i64 + 1,
                word: word.clone(),
            })
            .collect())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<SensitiveWordRecord>, RepoError> {
        Ok(None)
    }

    async fn find_by_word(&self, _word: &str) -> Result<Option<SensitiveWordRecord>, RepoError> {
        Ok(None)
    }
}

pub(crate) fn guard_with(words: &[&str]) -> ModerationGuard {
    let repo = FixedWords(words.iter().map(|word| word.to_string()).collect());
    let cache = SensitiveWordCache::new(
        &CacheConfig::default(),
        Arc::new(repo),
        Arc::new(ManualClock::default()),
    );
    ModerationGuard::new(Arc::new(cache))
}
