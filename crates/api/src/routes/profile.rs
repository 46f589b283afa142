//! Own-profile endpoints: partial updates and avatar upload.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;

use persistence::repositories::{ProfileUpdate, UserRepository};
use shared::validation::{validate_hex_color, MAX_BIO_LENGTH, MAX_EMOJI_LENGTH};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::routes::users::{owner_profile, UserProfile};
use crate::services::uploads::UploadKind;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileBody {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub emoji: Option<String>,
    pub theme_color: Option<String>,
}

/// PUT /api/profile - partial profile update; absent fields are untouched.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<UpdateProfileBody>,
) -> Result<Json<UserProfile>, ApiError> {
    if let Some(name) = &body.name {
        if name.trim().is_empty() {
            return Err(ApiError::Validation("name cannot be empty".to_string()));
        }
    }
    if let Some(bio) = &body.bio {
        if bio.chars().count() > MAX_BIO_LENGTH {
            return Err(ApiError::Validation(format!(
                "bio cannot exceed {} characters",
                MAX_BIO_LENGTH
            )));
        }
    }
    if let Some(emoji) = &body.emoji {
        if emoji.chars().count() > MAX_EMOJI_LENGTH {
            return Err(ApiError::Validation(format!(
                "emoji cannot exceed {} characters",
                MAX_EMOJI_LENGTH
            )));
        }
    }
    if let Some(color) = &body.theme_color {
        if validate_hex_color(color).is_err() {
            return Err(ApiError::Validation(
                "theme_color must be a hex color like #7c3aed".to_string(),
            ));
        }
    }

    let update = ProfileUpdate {
        name: body.name.map(|n| n.trim().to_string()),
        bio: body.bio,
        emoji: body.emoji,
        theme_color: body.theme_color,
    };

    let users = UserRepository::new(state.pool.clone());
    users
        .update_profile(auth.user_id, &update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;

    let profile = owner_profile(&state, auth.user_id).await?;
    Ok(Json(profile))
}

/// POST /api/profile/avatar - multipart avatar upload.
pub async fn upload_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<UserProfile>, ApiError> {
    let mut stored: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("invalid multipart body: {}", e)))?
    {
        if field.name() != Some("avatar") {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::Validation("avatar part must be a file".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("failed to read upload: {}", e)))?;

        let url = state
            .uploads
            .save(UploadKind::Avatar, auth.user_id, &filename, &bytes)
            .await?;
        stored = Some(url);
        break;
    }

    let url = stored.ok_or_else(|| ApiError::Validation("no avatar file provided".to_string()))?;
    UserRepository::new(state.pool.clone())
        .set_avatar(auth.user_id, &url)
        .await?;

    let profile = owner_profile(&state, auth.user_id).await?;
    Ok(Json(profile))
}
