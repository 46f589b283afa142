//! Repository for registration invite database operations.

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{InviteEntity, InviteWithInviterEntity};
use crate::metrics::QueryTimer;

const INVITE_COLUMNS: &str = "id, email, token, invited_by, used, used_by, created_at, expires_at";

/// Repository for registration invite operations.
#[derive(Clone)]
pub struct InviteRepository {
    pool: PgPool,
}

impl InviteRepository {
    /// Creates a new invite repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds an invite by its token.
    pub async fn find_by_token(&self, token: &str) -> Result<Option<InviteEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_invite_by_token");
        let result = sqlx::query_as::<_, InviteEntity>(&format!(
            "SELECT {} FROM invites WHERE token = $1",
            INVITE_COLUMNS
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Finds an unconsumed invite by token, joined with the inviter's
    /// display name. Used by the public token lookup, which must not
    /// reveal more than validity and who invited.
    pub async fn find_unused_with_inviter(
        &self,
        token: &str,
    ) -> Result<Option<InviteWithInviterEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_invite_with_inviter");
        let result = sqlx::query_as::<_, InviteWithInviterEntity>(
            r#"
            SELECT i.id, i.email, i.used, i.expires_at, u.name AS inviter_name
            FROM invites i
            JOIN users u ON u.id = i.invited_by
            WHERE i.token = $1 AND i.used = FALSE
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Creates a new invite.
    pub async fn create(
        &self,
        email: &str,
        token: &str,
        invited_by: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<InviteEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_invite");
        let result = sqlx::query_as::<_, InviteEntity>(&format!(
            r#"
            INSERT INTO invites (email, token, invited_by, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            INVITE_COLUMNS
        ))
        .bind(email)
        .bind(token)
        .bind(invited_by)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Lists the invites one account has issued, newest first.
    pub async fn list_by_inviter(
        &self,
        invited_by: Uuid,
    ) -> Result<Vec<InviteEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_invites_by_inviter");
        let result = sqlx::query_as::<_, InviteEntity>(&format!(
            "SELECT {} FROM invites WHERE invited_by = $1 ORDER BY created_at DESC",
            INVITE_COLUMNS
        ))
        .bind(invited_by)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

/// Default invite expiration (7 days out).
pub fn default_expiration() -> DateTime<Utc> {
    Utc::now() + Duration::days(domain::models::invite::INVITE_EXPIRY_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_expiration_is_a_week_out() {
        let expiration = default_expiration();
        let diff = expiration - Utc::now();
        assert!(diff.num_days() >= 6 && diff.num_days() <= 7);
    }
}
