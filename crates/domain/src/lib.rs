//! Domain layer for the FriendCircle backend.
//!
//! This crate contains:
//! - Post content rules and invite token generation
//! - Notification kinds and message formatting
//! - Relative-time display formatting

pub mod models;
pub mod time;
