//! Comment repository for database operations.

use domain::models::notification::NotificationKind;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{CommentEntity, CommentFeedEntity};
use crate::metrics::QueryTimer;

/// Repository for comment-related database operations.
#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Creates a new CommentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All comments on a post, oldest first, with their authors.
    pub async fn list_for_post(
        &self,
        post_id: Uuid,
    ) -> Result<Vec<CommentFeedEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_comments");
        let result = sqlx::query_as::<_, CommentFeedEntity>(
            r#"
            SELECT c.id, c.user_id, c.post_id, c.body, c.created_at,
                   u.name AS author_name, u.avatar AS author_avatar,
                   u.emoji AS author_emoji, u.theme_color AS author_theme_color
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.post_id = $1
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Total number of comments.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_comments");
        let result = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Create a comment, notifying the post owner in the same transaction.
    ///
    /// Commenting on one's own post does not notify. Returns `None` when
    /// the post does not exist.
    pub async fn create(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        body: &str,
    ) -> Result<Option<CommentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("create_comment");

        let mut tx = self.pool.begin().await?;

        let owner_id = sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(owner_id) = owner_id else {
            timer.record();
            return Ok(None);
        };

        let comment = sqlx::query_as::<_, CommentEntity>(
            r#"
            INSERT INTO comments (user_id, post_id, body)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, post_id, body, created_at
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .bind(body)
        .fetch_one(&mut *tx)
        .await?;

        if owner_id != user_id {
            let actor_name =
                sqlx::query_scalar::<_, String>("SELECT name FROM users WHERE id = $1")
                    .bind(user_id)
                    .fetch_one(&mut *tx)
                    .await?;

            sqlx::query(
                r#"
                INSERT INTO notifications (user_id, kind, message, actor_id)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(owner_id)
            .bind(NotificationKind::Comment.as_str())
            .bind(NotificationKind::Comment.message(&actor_name))
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();

        Ok(Some(comment))
    }
}
