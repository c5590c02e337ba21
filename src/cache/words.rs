//! Process-local sensitive-word cache.
//!
//! The word list lives in an immutable [`WordSnapshot`] behind an `Arc`. A
//! refresh builds a new snapshot and swaps it in whole; readers clone the
//! `Arc` and scan without holding the lock. There is no background timer:
//! freshness is checked at the top of every read.

use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

use metrics::{counter, gauge};
use serde::Serialize;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::application::repos::SensitiveWordsRepo;
use crate::domain::entities::SensitiveWordRecord;

use super::clock::Clock;
use super::config::CacheConfig;
use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::words";

/// Outcome of scanning one or more texts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ModerationResult {
    pub is_sensitive: bool,
    pub matched_words: Vec<String>,
}

impl ModerationResult {
    pub fn clean() -> Self {
        Self::default()
    }

    fn from_matches(matched_words: Vec<String>) -> Self {
        Self {
            is_sensitive: !matched_words.is_empty(),
            matched_words,
        }
    }
}

/// What a refresh did to the cached word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// The store answered and its rows replaced the cached list.
    Refreshed { words: usize },
    /// The store failed; the previous list is still being served.
    Retained { words: usize },
}

impl RefreshOutcome {
    pub fn words(&self) -> usize {
        match self {
            Self::Refreshed { words } | Self::Retained { words } => *words,
        }
    }
}

#[derive(Debug, Default)]
struct WordSnapshot {
    entries: Vec<SensitiveWordRecord>,
    refreshed_at: Option<OffsetDateTime>,
}

impl WordSnapshot {
    /// Indices of every cached word contained in `text`, in cache order.
    fn scan_into(&self, text: &str, hits: &mut BTreeSet<usize>) {
        for (index, entry) in self.entries.iter().enumerate() {
            if text.contains(entry.word.as_str()) {
                hits.insert(index);
            }
        }
    }

    fn words_at(&self, hits: BTreeSet<usize>) -> Vec<String> {
        hits.into_iter()
            .filter_map(|index| self.entries.get(index))
            .map(|entry| entry.word.clone())
            .collect()
    }
}

/// Whether a snapshot must be reloaded before it may answer a check.
///
/// Empty and never-loaded snapshots always reload; otherwise the snapshot is
/// stale once strictly more than `staleness` has passed since it was loaded.
pub fn needs_refresh(
    cached_words: usize,
    refreshed_at: Option<OffsetDateTime>,
    now: OffsetDateTime,
    staleness: Duration,
) -> bool {
    match refreshed_at {
        _ if cached_words == 0 => true,
        None => true,
        Some(at) => now - at > staleness,
    }
}

/// In-memory view of the word store used to screen user content.
pub struct SensitiveWordCache {
    store: Arc<dyn SensitiveWordsRepo>,
    clock: Arc<dyn Clock>,
    staleness: Duration,
    snapshot: RwLock<Arc<WordSnapshot>>,
}

impl SensitiveWordCache {
    /// Create an empty cache; the first check loads it.
    pub fn new(
        config: &CacheConfig,
        store: Arc<dyn SensitiveWordsRepo>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            clock,
            staleness: config.staleness(),
            snapshot: RwLock::new(Arc::new(WordSnapshot::default())),
        }
    }

    /// Scan a single text for banned words.
    ///
    /// `None` and empty text are clean without consulting the cache.
    pub async fn check_text(&self, text: Option<&str>) -> ModerationResult {
        match text {
            Some(text) if !text.is_empty() => self.check_multiple_texts(&[text]).await,
            _ => ModerationResult::clean(),
        }
    }

    /// Scan several texts and return the de-duplicated union of their matches.
    ///
    /// Matched words are reported in cache order, so the order of `texts` has
    /// no effect on the result.
    pub async fn check_multiple_texts(&self, texts: &[&str]) -> ModerationResult {
        if texts.iter().all(|text| text.is_empty()) {
            return ModerationResult::clean();
        }

        let snapshot = self.fresh_snapshot().await;
        let mut hits = BTreeSet::new();
        for text in texts.iter().filter(|text| !text.is_empty()) {
            snapshot.scan_into(text, &mut hits);
        }

        ModerationResult::from_matches(snapshot.words_at(hits))
    }

    /// Reload from the store now, regardless of age.
    pub async fn refresh_cache(&self) -> RefreshOutcome {
        self.reload().await
    }

    /// Cached words, subject to the same freshness check as the scanning path.
    pub async fn list_words(&self) -> Vec<SensitiveWordRecord> {
        self.fresh_snapshot().await.entries.clone()
    }

    /// When the cached list was last loaded successfully.
    pub fn last_refreshed_at(&self) -> Option<OffsetDateTime> {
        self.current().refreshed_at
    }

    fn current(&self) -> Arc<WordSnapshot> {
        rw_read(&self.snapshot, SOURCE, "current").clone()
    }

    async fn fresh_snapshot(&self) -> Arc<WordSnapshot> {
        let snapshot = self.current();
        let now = self.clock.now();
        if !needs_refresh(
            snapshot.entries.len(),
            snapshot.refreshed_at,
            now,
            self.staleness,
        ) {
            return snapshot;
        }

        debug!(
            target = "linggan::moderation::cache",
            cached_words = snapshot.entries.len(),
            "Word snapshot is stale; reloading"
        );
        self.reload().await;
        self.current()
    }

    async fn reload(&self) -> RefreshOutcome {
        match self.store.list_all().await {
            Ok(rows) => {
                let entries: Vec<SensitiveWordRecord> =
                    rows.into_iter().filter(|row| !row.word.is_empty()).collect();
                let words = entries.len();
                let snapshot = Arc::new(WordSnapshot {
                    entries,
                    refreshed_at: Some(self.clock.now()),
                });
                *rw_write(&self.snapshot, SOURCE, "reload") = snapshot;

                counter!("linggan_moderation_refresh_total").increment(1);
                gauge!("linggan_moderation_cached_words").set(words as f64);
                info!(
                    target = "linggan::moderation::cache",
                    words, "Sensitive-word cache refreshed"
                );
                RefreshOutcome::Refreshed { words }
            }
            Err(err) => {
                let words = self.current().entries.len();
                counter!("linggan_moderation_refresh_failed_total").increment(1);
                warn!(
                    target = "linggan::moderation::cache",
                    error = %err,
                    retained_words = words,
                    "Sensitive-word reload failed; serving previous list"
                );
                RefreshOutcome::Retained { words }
            }
        }
    }
}
