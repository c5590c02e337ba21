//! Cache configuration.
//!
//! Controls the sensitive-word cache via the `[moderation]` table of `linggan.toml`.

use serde::Deserialize;
use time::Duration;

const DEFAULT_STALENESS_SECONDS: u64 = 3600;

/// Sensitive-word cache configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Age after which the next check reloads the word list.
    pub staleness_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            staleness_seconds: DEFAULT_STALENESS_SECONDS,
        }
    }
}

impl From<&crate::config::ModerationSettings> for CacheConfig {
    fn from(settings: &crate::config::ModerationSettings) -> Self {
        Self {
            staleness_seconds: settings.staleness_seconds.get(),
        }
    }
}

impl CacheConfig {
    /// Staleness threshold as a signed duration, saturating at `i64::MAX` seconds.
    pub fn staleness(&self) -> Duration {
        Duration::seconds(i64::try_from(self.staleness_seconds).unwrap_or(i64::MAX))
    }
}
