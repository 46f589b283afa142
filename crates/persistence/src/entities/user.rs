//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub bio: String,
    pub avatar: String,
    pub emoji: String,
    pub theme_color: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_seen: Option<DateTime<Utc>>,
}

/// A users row joined with post/like aggregates, as shown on profiles.
#[derive(Debug, Clone, FromRow)]
pub struct UserWithStatsEntity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub bio: String,
    pub avatar: String,
    pub emoji: String,
    pub theme_color: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub last_seen: Option<DateTime<Utc>>,
    pub total_posts: i64,
    pub total_likes: i64,
}
