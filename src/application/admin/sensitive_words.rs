use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::application::repos::{RepoError, SensitiveWordsRepo, SensitiveWordsWriteRepo};
use crate::cache::{RefreshOutcome, SensitiveWordCache};
use crate::domain::entities::SensitiveWordRecord;
use crate::domain::error::DomainError;
use crate::domain::words::validate_word;

#[derive(Debug, Error)]
pub enum AdminSensitiveWordError {
    #[error(transparent)]
    Validation(#[from] DomainError),
    #[error("sensitive word `{word}` already exists")]
    Conflict { word: String },
    #[error("sensitive word {id} not found")]
    NotFound { id: i64 },
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemovedWord {
    pub id: i64,
    pub deleted: bool,
}

/// Administrative writes to the word store.
///
/// Every successful mutation refreshes this process's cache before returning,
/// so the next check on this instance already sees the change.
#[derive(Clone)]
pub struct AdminSensitiveWordService {
    reader: Arc<dyn SensitiveWordsRepo>,
    writer: Arc<dyn SensitiveWordsWriteRepo>,
    cache: Arc<SensitiveWordCache>,
}

impl AdminSensitiveWordService {
    pub fn new(
        reader: Arc<dyn SensitiveWordsRepo>,
        writer: Arc<dyn SensitiveWordsWriteRepo>,
        cache: Arc<SensitiveWordCache>,
    ) -> Self {
        Self {
            reader,
            writer,
            cache,
        }
    }

    /// Words as the checking path sees them, including its staleness window.
    pub async fn list_words(&self) -> Vec<SensitiveWordRecord> {
        self.cache.list_words().await
    }

    pub async fn add_word(
        &self,
        actor: &str,
        word: &str,
    ) -> Result<SensitiveWordRecord, AdminSensitiveWordError> {
        let word = validate_word(word)?;

        if self.reader.find_by_word(word).await?.is_some() {
            return Err(AdminSensitiveWordError::Conflict {
                word: word.to_string(),
            });
        }

        let record = match self.writer.create_word(word).await {
            Ok(record) => record,
            Err(RepoError::Duplicate { .. }) => {
                return Err(AdminSensitiveWordError::Conflict {
                    word: word.to_string(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        let outcome = self.cache.refresh_cache().await;
        info!(
            target = "linggan::admin::sensitive_words",
            actor,
            id = record.id,
            cached_words = outcome.words(),
            "Sensitive word added"
        );
        Ok(record)
    }

    pub async fn remove_word(
        &self,
        actor: &str,
        id: i64,
    ) -> Result<RemovedWord, AdminSensitiveWordError> {
        if self.reader.find_by_id(id).await?.is_none() {
            return Err(AdminSensitiveWordError::NotFound { id });
        }

        if !self.writer.delete_word(id).await? {
            return Err(AdminSensitiveWordError::NotFound { id });
        }

        let outcome = self.cache.refresh_cache().await;
        info!(
            target = "linggan::admin::sensitive_words",
            actor,
            id,
            cached_words = outcome.words(),
            "Sensitive word removed"
        );
        Ok(RemovedWord { id, deleted: true })
    }

    /// Reload this process's cache on demand.
    pub async fn refresh(&self, actor: &str) -> RefreshOutcome {
        let outcome = self.cache.refresh_cache().await;
        info!(
            target = "linggan::admin::sensitive_words",
            actor,
            outcome = ?outcome,
            "Sensitive-word cache refresh requested"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::cache::{CacheConfig, ManualClock};

    #[derive(Default)]
    struct MemoryWords {
        rows: Mutex<Vec<SensitiveWordRecord>>,
        next_id: Mutex<i64>,
    }

    impl MemoryWords {
        fn count(&self, word: &str) -> usize {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .filter(|row| row.word == word)
                .count()
        }
    }

    #[async_trait]
    impl SensitiveWordsRepo for MemoryWords {
        async fn list_all(&self) -> Result<Vec<SensitiveWordRecord>, RepoError> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<SensitiveWordRecord>, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|row| row.id == id)
                .cloned())
        }

        async fn find_by_word(
            &self,
            word: &str,
        ) -> Result<Option<SensitiveWordRecord>, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|row| row.word == word)
                .cloned())
        }
    }

    #[async_trait]
    impl SensitiveWordsWriteRepo for MemoryWords {
        async fn create_word(&self, word: &str) -> Result<SensitiveWordRecord, RepoError> {
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|row| row.word == word) {
                return Err(RepoError::Duplicate {
                    constraint: "sensitive_words_word_key".into(),
                });
            }
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let record = SensitiveWordRecord {
                id: *next_id,
                word: word.to_string(),
            };
            rows.push(record.clone());
            Ok(record)
        }

        async fn delete_word(&self, id: i64) -> Result<bool, RepoError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|row| row.id != id);
            Ok(rows.len() != before)
        }
    }

    /// Reader that never sees an existing word, so duplicates surface from the writer.
    struct BlindReader;

    #[async_trait]
    impl SensitiveWordsRepo for BlindReader {
        async fn list_all(&self) -> Result<Vec<SensitiveWordRecord>, RepoError> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, _id: i64) -> Result<Option<SensitiveWordRecord>, RepoError> {
            Ok(None)
        }

        async fn find_by_word(
            &self,
            _word: &str,
        ) -> Result<Option<SensitiveWordRecord>, RepoError> {
            Ok(None)
        }
    }

    fn service(store: &Arc<MemoryWords>) -> (AdminSensitiveWordService, Arc<SensitiveWordCache>) {
        let cache = Arc::new(SensitiveWordCache::new(
            &CacheConfig::default(),
            store.clone(),
            Arc::new(ManualClock::default()),
        ));
        let service = AdminSensitiveWordService::new(store.clone(), store.clone(), cache.clone());
        (service, cache)
    }

    #[tokio::test]
    async fn add_word_is_visible_to_the_next_check() {
        let store = Arc::new(MemoryWords::default());
        let (service, cache) = service(&store);
        service.add_word("admin", "seed").await.unwrap();
        assert!(!cache.check_text(Some("fresh")).await.is_sensitive);

        service.add_word("admin", "fresh").await.unwrap();

        let result = cache.check_text(Some("fresh")).await;
        assert!(result.is_sensitive);
        assert_eq!(result.matched_words, vec!["fresh"]);
    }

    #[tokio::test]
    async fn add_word_stores_padding_verbatim() {
        let store = Arc::new(MemoryWords::default());
        let (service, cache) = service(&store);

        let record = service.add_word("admin", " ass ").await.unwrap();
        assert_eq!(record.word, " ass ");

        let result = cache.check_text(Some(" ass ")).await;
        assert_eq!(result.matched_words, vec![" ass "]);
        assert!(!cache.check_text(Some("a class act")).await.is_sensitive);
    }

    #[tokio::test]
    async fn add_word_rejects_blank_input() {
        let store = Arc::new(MemoryWords::default());
        let (service, _) = service(&store);

        let err = service.add_word("admin", "   ").await.unwrap_err();
        assert!(matches!(err, AdminSensitiveWordError::Validation(_)));
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_add_is_a_conflict() {
        let store = Arc::new(MemoryWords::default());
        let (service, _) = service(&store);

        service.add_word("admin", "twice").await.unwrap();
        let err = service.add_word("admin", "twice").await.unwrap_err();

        assert!(matches!(err, AdminSensitiveWordError::Conflict { ref word } if word == "twice"));
        assert_eq!(store.count("twice"), 1);
    }

    #[tokio::test]
    async fn unique_violation_from_store_is_a_conflict() {
        let store = Arc::new(MemoryWords::default());
        let cache = Arc::new(SensitiveWordCache::new(
            &CacheConfig::default(),
            store.clone(),
            Arc::new(ManualClock::default()),
        ));
        let service = AdminSensitiveWordService::new(Arc::new(BlindReader), store.clone(), cache);

        service.add_word("admin", "race").await.unwrap();
        let err = service.add_word("admin", "race").await.unwrap_err();

        assert!(matches!(err, AdminSensitiveWordError::Conflict { .. }));
        assert_eq!(store.count("race"), 1);
    }

    #[tokio::test]
    async fn remove_word_is_visible_to_the_next_check() {
        let store = Arc::new(MemoryWords::default());
        let (service, cache) = service(&store);
        service.add_word("admin", "keep").await.unwrap();
        let gone = service.add_word("admin", "gone").await.unwrap();
        assert!(cache.check_text(Some("gone")).await.is_sensitive);

        let removed = service.remove_word("admin", gone.id).await.unwrap();

        assert_eq!(
            removed,
            RemovedWord {
                id: gone.id,
                deleted: true
            }
        );
        assert!(!cache.check_text(Some("gone")).await.is_sensitive);
    }

    #[tokio::test]
    async fn remove_unknown_id_is_not_found() {
        let store = Arc::new(MemoryWords::default());
        let (service, _) = service(&store);
        service.add_word("admin", "stays").await.unwrap();

        let err = service.remove_word("admin", 404).await.unwrap_err();

        assert!(matches!(err, AdminSensitiveWordError::NotFound { id: 404 }));
        assert_eq!(store.count("stays"), 1);
    }

    #[tokio::test]
    async fn list_words_reflects_mutations_immediately() {
        let store = Arc::new(MemoryWords::default());
        let (service, _) = service(&store);

        service.add_word("admin", "one").await.unwrap();
        service.add_word("admin", "two").await.unwrap();

        let words: Vec<String> = service
            .list_words()
            .await
            .into_iter()
            .map(|record| record.word)
            .collect();
        assert_eq!(words, vec!["one", "two"]);
    }
}
