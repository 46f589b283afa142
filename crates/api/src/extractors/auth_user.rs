//! Session authentication extractor.
//!
//! Provides an Axum extractor for the authenticated account on
//! protected routes.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser as AuthUserData;

/// Authenticated account for the current request.
///
/// Normally populated by the `require_auth` middleware; falls back to
/// validating the Bearer token directly so handlers can also be used on
/// routes without the middleware layer.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Account ID from the session token.
    pub user_id: Uuid,
}

impl From<AuthUserData> for AuthUser {
    fn from(data: AuthUserData) -> Self {
        Self {
            user_id: data.user_id,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Middleware already validated the token on protected routes.
        if let Some(auth) = parts.extensions.get::<AuthUserData>() {
            return Ok(auth.clone().into());
        }

        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Unauthorized("Invalid Authorization header format".to_string())
        })?;

        let auth_data = AuthUserData::validate(&state.jwt, token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(auth_data.into())
    }
}
