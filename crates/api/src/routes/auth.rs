//! Registration, login and session endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use persistence::repositories::{InviteRepository, UserRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::routes::users::{owner_profile, UserProfile};
use crate::services::auth::{AuthService, RegisterRequest};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterBody {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[validate(email(message = "invalid email address"))]
    pub email: String,

    pub password: String,

    pub invite_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct CheckInviteResponse {
    pub valid: bool,
    pub email: String,
    pub invited_by: String,
}

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(
        state.pool.clone(),
        state.jwt.as_ref().clone(),
        state.config.limits.min_password_length,
    )
}

/// POST /api/auth/register - create an account, consuming an invite.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    body.validate()?;

    let outcome = auth_service(&state)
        .register(RegisterRequest {
            name: body.name,
            email: body.email,
            password: body.password,
            invite_token: body.invite_token,
        })
        .await?;

    let user = owner_profile(&state, outcome.user.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token: outcome.token,
            user,
        }),
    ))
}

/// POST /api/auth/login - verify credentials and issue a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<SessionResponse>, ApiError> {
    let outcome = auth_service(&state).login(&body.email, &body.password).await?;
    let user = owner_profile(&state, outcome.user.id).await?;
    Ok(Json(SessionResponse {
        token: outcome.token,
        user,
    }))
}

/// GET /api/auth/me - the caller's own profile. Bumps last_seen.
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserProfile>, ApiError> {
    let users = UserRepository::new(state.pool.clone());
    users.touch_last_seen(auth.user_id, Utc::now()).await?;
    let user = owner_profile(&state, auth.user_id).await?;
    Ok(Json(user))
}

/// GET /api/auth/check-invite/:token - public invite lookup.
///
/// Reveals only the invite email and the inviter's display name; the
/// invite is not consumed. Unknown or used tokens read as 404 so the
/// endpoint cannot be used to distinguish the two.
pub async fn check_invite(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<CheckInviteResponse>, ApiError> {
    let invite = InviteRepository::new(state.pool.clone())
        .find_unused_with_inviter(&token)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invite not found or already used".to_string()))?;

    if invite.is_expired() {
        return Err(ApiError::Conflict("Invite has expired".to_string()));
    }

    Ok(Json(CheckInviteResponse {
        valid: true,
        email: invite.email,
        invited_by: invite.inviter_name,
    }))
}
