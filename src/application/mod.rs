//! Application services layer.

pub mod admin;
pub mod content;
pub mod error;
pub mod moderation;
pub mod repos;
