//! Application services for the administrative surface.

pub mod sensitive_words;

pub use sensitive_words::AdminSensitiveWordService;
