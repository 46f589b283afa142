//! HTTP route handlers.

pub mod auth;
pub mod comments;
pub mod health;
pub mod invites;
pub mod notifications;
pub mod posts;
pub mod profile;
pub mod stats;
pub mod users;
