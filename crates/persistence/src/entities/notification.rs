//! Notification entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A notifications row joined with the acting user's display fields.
///
/// The actor columns come from a LEFT JOIN: they are `None` when the
/// notification has no actor or the actor's account no longer exists.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub message: String,
    pub link: String,
    pub read: bool,
    pub actor_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub actor_name: Option<String>,
    pub actor_avatar: Option<String>,
    pub actor_emoji: Option<String>,
}
