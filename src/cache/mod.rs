//! Sensitive-word cache.
//!
//! Keeps the banned-word list in process memory so content checks avoid a
//! database round trip. Each process holds its own copy; there is no
//! cross-instance invalidation, so peers converge within one staleness window.
//!
//! ## Configuration
//!
//! ```toml
//! [moderation]
//! staleness_seconds = 3600
//! ```

pub mod clock;
mod config;
mod lock;
mod words;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CacheConfig;
pub use words::{ModerationResult, RefreshOutcome, SensitiveWordCache, needs_refresh};
