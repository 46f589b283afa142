//! Aggregate site statistics endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use persistence::repositories::StatsRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_users: i64,
    pub total_posts: i64,
    pub total_comments: i64,
    /// Accounts seen within the last 5 minutes.
    pub online_users: i64,
    /// Accounts created within the last 7 days.
    pub new_members_week: i64,
}

/// GET /api/stats - community counters.
pub async fn get_stats(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<StatsResponse>, ApiError> {
    let stats = StatsRepository::new(state.pool.clone()).site_stats().await?;
    Ok(Json(StatsResponse {
        total_users: stats.total_users,
        total_posts: stats.total_posts,
        total_comments: stats.total_comments,
        online_users: stats.online_users,
        new_members_week: stats.new_members_week,
    }))
}
