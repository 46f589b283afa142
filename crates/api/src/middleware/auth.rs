//! Session authentication middleware.
//!
//! Validates the Bearer token on protected routes and stores the
//! authenticated account in request extensions for downstream handlers.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::app::AppState;
use shared::jwt::JwtConfig;

/// Authenticated account information extracted from a session token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Account ID from the token's subject claim.
    pub user_id: Uuid,
}

impl AuthUser {
    /// Validates a session token and returns the authenticated account.
    pub fn validate(jwt: &JwtConfig, token: &str) -> Result<Self, String> {
        let claims = jwt
            .validate_token(token)
            .map_err(|e| format!("Invalid token: {}", e))?;

        let user_id =
            Uuid::parse_str(&claims.sub).map_err(|_| "Invalid account ID in token".to_string())?;

        Ok(AuthUser { user_id })
    }
}

/// Middleware that requires a valid session token.
///
/// Rejects requests without a valid Bearer token; otherwise stores the
/// authenticated account in request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return unauthorized_response("Missing or invalid Authorization header");
        }
    };

    match AuthUser::validate(&state.jwt, token) {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!("Session token validation failed: {}", e);
            unauthorized_response("Invalid or expired token")
        }
    }
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt() -> JwtConfig {
        JwtConfig::new("test-secret", 3600)
    }

    #[test]
    fn test_validate_roundtrip() {
        let config = jwt();
        let user_id = Uuid::new_v4();
        let token = config.generate_token(user_id).unwrap();

        let auth = AuthUser::validate(&config, &token).unwrap();
        assert_eq!(auth.user_id, user_id);
    }

    #[test]
    fn test_validate_rejects_garbage() {
        assert!(AuthUser::validate(&jwt(), "garbage").is_err());
    }

    #[test]
    fn test_validate_rejects_foreign_secret() {
        let token = JwtConfig::new("other-secret", 3600)
            .generate_token(Uuid::new_v4())
            .unwrap();
        assert!(AuthUser::validate(&jwt(), &token).is_err());
    }
}
