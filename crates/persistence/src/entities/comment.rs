//! Comment entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the comments table.
#[derive(Debug, Clone, FromRow)]
pub struct CommentEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// A comments row joined with its author, as rendered under a post.
#[derive(Debug, Clone, FromRow)]
pub struct CommentFeedEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
    pub author_avatar: String,
    pub author_emoji: String,
    pub author_theme_color: String,
}
