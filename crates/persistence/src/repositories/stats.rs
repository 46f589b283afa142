//! Aggregate site statistics.

use sqlx::{FromRow, PgPool};

use crate::metrics::QueryTimer;

/// Aggregate counters shown on the stats endpoint.
#[derive(Debug, Clone, FromRow)]
pub struct SiteStats {
    /// Active accounts.
    pub total_users: i64,
    pub total_posts: i64,
    pub total_comments: i64,
    /// Accounts seen within the last 5 minutes.
    pub online_users: i64,
    /// Accounts created within the last 7 days.
    pub new_members_week: i64,
}

/// Repository for aggregate statistics.
#[derive(Clone)]
pub struct StatsRepository {
    pool: PgPool,
}

impl StatsRepository {
    /// Creates a new stats repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Collects all site counters in one round trip.
    pub async fn site_stats(&self) -> Result<SiteStats, sqlx::Error> {
        let timer = QueryTimer::new("site_stats");
        let result = sqlx::query_as::<_, SiteStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users WHERE is_active = TRUE) AS total_users,
                (SELECT COUNT(*) FROM posts) AS total_posts,
                (SELECT COUNT(*) FROM comments) AS total_comments,
                (SELECT COUNT(*) FROM users
                 WHERE last_seen > NOW() - INTERVAL '5 minutes') AS online_users,
                (SELECT COUNT(*) FROM users
                 WHERE created_at > NOW() - INTERVAL '7 days') AS new_members_week
            "#,
        )
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
