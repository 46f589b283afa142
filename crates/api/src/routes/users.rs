//! Member directory endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use persistence::entities::UserWithStatsEntity;
use persistence::repositories::UserRepository;

use crate::app::AppState;
use crate::error::ApiError;

/// Profile view of an account.
///
/// The email address is only present in the owner's own view (register,
/// login, `/api/auth/me`); directory and public profile responses omit it.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
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

impl UserProfile {
    pub fn from_entity(entity: UserWithStatsEntity, include_email: bool) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: include_email.then_some(entity.email),
            bio: entity.bio,
            avatar: entity.avatar,
            emoji: entity.emoji,
            theme_color: entity.theme_color,
            is_admin: entity.is_admin,
            created_at: entity.created_at,
            last_seen: entity.last_seen,
            total_posts: entity.total_posts,
            total_likes: entity.total_likes,
        }
    }
}

/// Fetches the caller's own profile view, email included.
pub(crate) async fn owner_profile(
    state: &AppState,
    user_id: Uuid,
) -> Result<UserProfile, ApiError> {
    let entity = UserRepository::new(state.pool.clone())
        .find_with_stats(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;
    Ok(UserProfile::from_entity(entity, true))
}

/// GET /api/users - active members, most recently seen first.
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserProfile>>, ApiError> {
    let users = UserRepository::new(state.pool.clone())
        .list_active_with_stats()
        .await?;
    Ok(Json(
        users
            .into_iter()
            .map(|u| UserProfile::from_entity(u, false))
            .collect(),
    ))
}

/// GET /api/users/:id - a member's public profile.
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserProfile>, ApiError> {
    let entity = UserRepository::new(state.pool.clone())
        .find_with_stats(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
    Ok(Json(UserProfile::from_entity(entity, false)))
}
