//! Invite issuance and listing.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain::models::invite::generate_invite_token;
use persistence::entities::InviteEntity;
use persistence::repositories::{default_expiration, InviteRepository, UserRepository};
use shared::validation::normalize_email;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInviteBody {
    #[validate(email(message = "invalid email address"))]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct InviteView {
    pub id: Uuid,
    pub email: String,
    pub token: String,
    pub used: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub invite_url: String,
}

impl InviteView {
    fn from_entity(entity: InviteEntity, base_url: &str) -> Self {
        let invite_url = format!(
            "{}/invite/{}",
            base_url.trim_end_matches('/'),
            entity.token
        );
        Self {
            id: entity.id,
            email: entity.email,
            token: entity.token,
            used: entity.used,
            created_at: entity.created_at,
            expires_at: entity.expires_at,
            invite_url,
        }
    }
}

/// POST /api/invites - issue an invite for an email address.
pub async fn create_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateInviteBody>,
) -> Result<(StatusCode, Json<InviteView>), ApiError> {
    body.validate()?;
    let email = normalize_email(&body.email);

    if UserRepository::new(state.pool.clone())
        .find_by_email(&email)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "Email is already registered".to_string(),
        ));
    }

    let token = generate_invite_token();
    let invite = InviteRepository::new(state.pool.clone())
        .create(&email, &token, auth.user_id, default_expiration())
        .await?;

    tracing::info!(invite_id = %invite.id, inviter = %auth.user_id, "invite issued");
    Ok((
        StatusCode::CREATED,
        Json(InviteView::from_entity(invite, &state.config.server.base_url)),
    ))
}

/// GET /api/invites - the caller's issued invites, newest first.
pub async fn list_invites(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<InviteView>>, ApiError> {
    let invites = InviteRepository::new(state.pool.clone())
        .list_by_inviter(auth.user_id)
        .await?;
    let base_url = &state.config.server.base_url;
    Ok(Json(
        invites
            .into_iter()
            .map(|i| InviteView::from_entity(i, base_url))
            .collect(),
    ))
}
