//! Post entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the posts table.
#[derive(Debug, Clone, FromRow)]
pub struct PostEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A posts row joined with its author and like/comment aggregates, as
/// rendered in the feed.
#[derive(Debug, Clone, FromRow)]
pub struct PostFeedEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_name: String,
    pub author_avatar: String,
    pub author_emoji: String,
    pub author_theme_color: String,
    pub likes_count: i64,
    pub comments_count: i64,
    pub liked_by_me: bool,
}
