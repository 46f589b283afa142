//! Post repository for database operations.
//!
//! Like toggling bundles its notification into the same transaction as
//! the likes-table write, so a notification can never outlive a like that
//! failed to persist.

use domain::models::notification::NotificationKind;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{PostEntity, PostFeedEntity};
use crate::metrics::QueryTimer;

/// Feed row selection shared by the listing and single-post queries.
/// `$1` is always the viewing user (drives `liked_by_me`).
const FEED_SELECT: &str = r#"
    SELECT p.id, p.user_id, p.body, p.image, p.created_at, p.updated_at,
           u.name AS author_name, u.avatar AS author_avatar,
           u.emoji AS author_emoji, u.theme_color AS author_theme_color,
           (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS likes_count,
           (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comments_count,
           EXISTS(SELECT 1 FROM likes l WHERE l.post_id = p.id AND l.user_id = $1) AS liked_by_me
    FROM posts p
    JOIN users u ON u.id = p.user_id
"#;

/// Outcome of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeToggle {
    /// Whether the post is liked by the toggling user after the call.
    pub liked: bool,
    pub likes_count: i64,
}

/// Repository for post-related database operations.
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    /// Creates a new PostRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a post.
    pub async fn create(
        &self,
        user_id: Uuid,
        body: &str,
        image: &str,
    ) -> Result<PostEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_post");
        let result = sqlx::query_as::<_, PostEntity>(
            r#"
            INSERT INTO posts (user_id, body, image)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, body, image, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(body)
        .bind(image)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Total number of posts.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_posts");
        let result = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Number of posts by one author.
    pub async fn count_by_author(&self, author_id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_user_posts");
        let result =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE user_id = $1")
                .bind(author_id)
                .fetch_one(&self.pool)
                .await;
        timer.record();
        result
    }

    /// One page of the feed, newest first, annotated for the viewing user.
    pub async fn list_page(
        &self,
        viewer_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostFeedEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_posts");
        let result = sqlx::query_as::<_, PostFeedEntity>(&format!(
            "{} ORDER BY p.created_at DESC LIMIT $2 OFFSET $3",
            FEED_SELECT
        ))
        .bind(viewer_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// One page of a single author's posts, newest first.
    pub async fn list_by_author(
        &self,
        viewer_id: Uuid,
        author_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostFeedEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_user_posts");
        let result = sqlx::query_as::<_, PostFeedEntity>(&format!(
            "{} WHERE p.user_id = $2 ORDER BY p.created_at DESC LIMIT $3 OFFSET $4",
            FEED_SELECT
        ))
        .bind(viewer_id)
        .bind(author_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// One feed-annotated post.
    pub async fn find_feed_by_id(
        &self,
        viewer_id: Uuid,
        post_id: Uuid,
    ) -> Result<Option<PostFeedEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_post_by_id");
        let result =
            sqlx::query_as::<_, PostFeedEntity>(&format!("{} WHERE p.id = $2", FEED_SELECT))
                .bind(viewer_id)
                .bind(post_id)
                .fetch_optional(&self.pool)
                .await;
        timer.record();
        result
    }

    /// The post's author, or `None` when the post does not exist.
    pub async fn find_author(&self, post_id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
        let timer = QueryTimer::new("find_post_author");
        let result = sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Delete a post. Comments and likes go with it via FK cascade.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(&self, post_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_post");
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }

    /// Toggle the viewer's like on a post.
    ///
    /// A second toggle by the same user reverses the first. Only the
    /// transition to liked notifies the post owner, and never for the
    /// owner liking their own post. The like write and the notification
    /// insert commit together or not at all.
    ///
    /// Returns `None` when the post does not exist.
    pub async fn toggle_like(
        &self,
        post_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<LikeToggle>, sqlx::Error> {
        let timer = QueryTimer::new("toggle_like");

        let mut tx = self.pool.begin().await?;

        let owner_id = sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(owner_id) = owner_id else {
            timer.record();
            return Ok(None);
        };

        let removed = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND post_id = $2")
            .bind(user_id)
            .bind(post_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let liked = removed == 0;
        if liked {
            sqlx::query("INSERT INTO likes (user_id, post_id) VALUES ($1, $2)")
                .bind(user_id)
                .bind(post_id)
                .execute(&mut *tx)
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
                .bind(NotificationKind::Like.as_str())
                .bind(NotificationKind::Like.message(&actor_name))
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        let likes_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes WHERE post_id = $1")
                .bind(post_id)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;
        timer.record();

        Ok(Some(LikeToggle { liked, likes_count }))
    }
}
