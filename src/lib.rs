//! Linggan content service: sensitive-word moderation in front of every
//! user-generated write.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
