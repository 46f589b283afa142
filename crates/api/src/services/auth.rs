//! Account registration and login.
//!
//! Registration is invite-gated: after the first account, every new user
//! must present an unused, unexpired invite issued for their email address.
//! User creation and invite consumption happen in a single transaction so a
//! token can never admit two accounts.

use chrono::Utc;
use domain::models::NotificationKind;
use persistence::entities::UserEntity;
use persistence::repositories::{InviteRepository, UserRepository};
use shared::jwt::{JwtConfig, JwtError};
use shared::password::{hash_password, verify_password, PasswordError};
use shared::validation::normalize_email;
use sqlx::PgPool;

/// Advisory lock key serializing account creation.
const SIGNUP_LOCK_KEY: i64 = 0x4652_4945_4e44;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("name, email and password are required")]
    MissingFields,

    #[error("password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("email is already registered")]
    EmailAlreadyRegistered,

    #[error("an invite is required to register")]
    InviteRequired,

    #[error("invite is invalid or already used")]
    InviteInvalid,

    #[error("invite has expired")]
    InviteExpired,

    #[error("invite was issued for a different email")]
    InviteEmailMismatch,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    #[error("token error: {0}")]
    Token(#[from] JwtError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub invite_token: Option<String>,
}

pub struct AuthOutcome {
    pub user: UserEntity,
    pub token: String,
}

pub struct AuthService {
    pool: PgPool,
    jwt: JwtConfig,
    min_password_length: usize,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt: JwtConfig, min_password_length: usize) -> Self {
        Self {
            pool,
            jwt,
            min_password_length,
        }
    }

    /// Creates an account, consuming the presented invite atomically.
    ///
    /// The first account ever created skips the invite requirement and is
    /// granted admin. Everyone after that must present a token that is
    /// unused, unexpired and bound to the registering email.
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthOutcome, AuthError> {
        let name = req.name.trim().to_string();
        let email = normalize_email(&req.email);
        if name.is_empty() || email.is_empty() || req.password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        if req.password.len() < self.min_password_length {
            return Err(AuthError::PasswordTooShort(self.min_password_length));
        }

        let users = UserRepository::new(self.pool.clone());
        if users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyRegistered);
        }

        let invite = if users.count().await? == 0 {
            None
        } else {
            let token = req
                .invite_token
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .ok_or(AuthError::InviteRequired)?;

            let invites = InviteRepository::new(self.pool.clone());
            let invite = invites
                .find_by_token(token)
                .await?
                .filter(|i| !i.used)
                .ok_or(AuthError::InviteInvalid)?;
            if invite.is_expired() {
                return Err(AuthError::InviteExpired);
            }
            if !invite.matches_email(&email) {
                return Err(AuthError::InviteEmailMismatch);
            }
            Some(invite)
        };

        let password_hash = hash_password(&req.password)?;

        let mut tx = self.pool.begin().await?;

        // The count above was only advisory. Recheck under a lock so two
        // concurrent registrations against an empty table cannot both skip
        // the invite gate and claim admin.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SIGNUP_LOCK_KEY)
            .execute(&mut *tx)
            .await?;
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *tx)
            .await?;
        let is_admin = existing == 0;
        if !is_admin && invite.is_none() {
            return Err(AuthError::InviteRequired);
        }

        let user = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (email, password_hash, name, is_admin)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, name, bio, avatar, emoji, theme_color,
                      is_admin, is_active, created_at, last_seen
            "#,
        )
        .bind(&email)
        .bind(&password_hash)
        .bind(&name)
        .bind(is_admin)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(invite) = invite {
            // Guards against a concurrent registration racing on the same token.
            let consumed = sqlx::query(
                "UPDATE invites SET used = TRUE, used_by = $1 WHERE id = $2 AND used = FALSE",
            )
            .bind(user.id)
            .bind(invite.id)
            .execute(&mut *tx)
            .await?;
            if consumed.rows_affected() == 0 {
                tx.rollback().await?;
                return Err(AuthError::InviteInvalid);
            }

            sqlx::query(
                r#"
                INSERT INTO notifications (user_id, actor_id, kind, message)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(invite.invited_by)
            .bind(user.id)
            .bind(NotificationKind::InviteAccepted.as_str())
            .bind(NotificationKind::InviteAccepted.message(&user.name))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        let token = self.jwt.generate_token(user.id)?;
        tracing::info!(user_id = %user.id, admin = is_admin, "user registered");
        Ok(AuthOutcome { user, token })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthOutcome, AuthError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let users = UserRepository::new(self.pool.clone());
        let user = users
            .find_by_email(&email)
            .await?
            .filter(|u| u.is_active)
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        users.touch_last_seen(user.id, Utc::now()).await?;
        let token = self.jwt.generate_token(user.id)?;
        tracing::info!(user_id = %user.id, "user logged in");
        Ok(AuthOutcome { user, token })
    }
}
