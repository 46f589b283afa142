//! User repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{UserEntity, UserWithStatsEntity};
use crate::metrics::QueryTimer;

/// Columns selected for a plain users row.
const USER_COLUMNS: &str = "id, email, password_hash, name, bio, avatar, emoji, theme_color, \
                            is_admin, is_active, created_at, last_seen";

/// Partial profile update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub emoji: Option<String>,
    pub theme_color: Option<String>,
}

/// Repository for user-related database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a user by email address. Emails are stored lowercase.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_email");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Total number of accounts ever created, active or not.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_users");
        let result = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Update the user's last-seen timestamp.
    pub async fn touch_last_seen(
        &self,
        user_id: Uuid,
        seen_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("touch_user_last_seen");
        sqlx::query("UPDATE users SET last_seen = $1 WHERE id = $2")
            .bind(seen_at)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(())
    }

    /// Apply a partial profile update; unspecified fields keep their value.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_user_profile");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                bio = COALESCE($3, bio),
                emoji = COALESCE($4, emoji),
                theme_color = COALESCE($5, theme_color)
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(user_id)
        .bind(update.name.as_deref())
        .bind(update.bio.as_deref())
        .bind(update.emoji.as_deref())
        .bind(update.theme_color.as_deref())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Set the stored avatar filename.
    pub async fn set_avatar(&self, user_id: Uuid, avatar: &str) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("set_user_avatar");
        sqlx::query("UPDATE users SET avatar = $1 WHERE id = $2")
            .bind(avatar)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(())
    }

    /// List active users with profile aggregates, most recently seen first.
    pub async fn list_active_with_stats(&self) -> Result<Vec<UserWithStatsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_users");
        let result = sqlx::query_as::<_, UserWithStatsEntity>(
            r#"
            SELECT u.id, u.email, u.name, u.bio, u.avatar, u.emoji, u.theme_color,
                   u.is_admin, u.created_at, u.last_seen,
                   (SELECT COUNT(*) FROM posts p WHERE p.user_id = u.id) AS total_posts,
                   (SELECT COUNT(*) FROM likes l
                    JOIN posts p ON p.id = l.post_id
                    WHERE p.user_id = u.id) AS total_likes
            FROM users u
            WHERE u.is_active = TRUE
            ORDER BY u.last_seen DESC NULLS LAST
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Fetch one user with profile aggregates.
    pub async fn find_with_stats(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserWithStatsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_with_stats");
        let result = sqlx::query_as::<_, UserWithStatsEntity>(
            r#"
            SELECT u.id, u.email, u.name, u.bio, u.avatar, u.emoji, u.theme_color,
                   u.is_admin, u.created_at, u.last_seen,
                   (SELECT COUNT(*) FROM posts p WHERE p.user_id = u.id) AS total_posts,
                   (SELECT COUNT(*) FROM likes l
                    JOIN posts p ON p.id = l.post_id
                    WHERE p.user_id = u.id) AS total_likes
            FROM users u
            WHERE u.id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
