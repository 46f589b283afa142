//! Notification endpoints.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use domain::models::notification::NOTIFICATION_PAGE_SIZE;
use domain::time::relative_time;
use persistence::entities::NotificationEntity;
use persistence::repositories::NotificationRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;

/// Display fields for the account a notification is about, absent when
/// that account has since been removed.
#[derive(Debug, Serialize)]
pub struct ActorSummary {
    pub id: Uuid,
    pub name: String,
    pub avatar: String,
    pub emoji: String,
}

#[derive(Debug, Serialize)]
pub struct NotificationView {
    pub id: Uuid,
    pub kind: String,
    pub message: String,
    pub link: String,
    pub read: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<ActorSummary>,
    pub created_at: DateTime<Utc>,
    pub time: String,
}

impl From<NotificationEntity> for NotificationView {
    fn from(entity: NotificationEntity) -> Self {
        let actor = match (entity.actor_id, entity.actor_name) {
            (Some(id), Some(name)) => Some(ActorSummary {
                id,
                name,
                avatar: entity.actor_avatar.unwrap_or_default(),
                emoji: entity.actor_emoji.unwrap_or_default(),
            }),
            _ => None,
        };
        Self {
            id: entity.id,
            kind: entity.kind,
            message: entity.message,
            link: entity.link,
            read: entity.read,
            actor,
            time: relative_time(entity.created_at),
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<NotificationView>,
    pub unread_count: i64,
}

/// GET /api/notifications - the caller's 50 most recent, newest first.
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<NotificationsResponse>, ApiError> {
    let repo = NotificationRepository::new(state.pool.clone());
    let notifications = repo
        .list_recent(auth.user_id, NOTIFICATION_PAGE_SIZE)
        .await?;
    let unread_count = repo.unread_count(auth.user_id).await?;

    Ok(Json(NotificationsResponse {
        notifications: notifications
            .into_iter()
            .map(NotificationView::from)
            .collect(),
        unread_count,
    }))
}

/// POST /api/notifications/read - mark all of the caller's as read.
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let updated = NotificationRepository::new(state.pool.clone())
        .mark_all_read(auth.user_id)
        .await?;
    Ok(Json(json!({ "updated": updated })))
}
