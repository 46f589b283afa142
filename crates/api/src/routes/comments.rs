//! Comment endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain::time::relative_time;
use persistence::entities::CommentFeedEntity;
use persistence::repositories::{CommentRepository, PostRepository, UserRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::routes::posts::AuthorSummary;

#[derive(Debug, Serialize)]
pub struct CommentView {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author: AuthorSummary,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub time: String,
}

impl From<CommentFeedEntity> for CommentView {
    fn from(entity: CommentFeedEntity) -> Self {
        Self {
            id: entity.id,
            post_id: entity.post_id,
            author: AuthorSummary {
                id: entity.user_id,
                name: entity.author_name,
                avatar: entity.author_avatar,
                emoji: entity.author_emoji,
                theme_color: entity.author_theme_color,
            },
            body: entity.body,
            time: relative_time(entity.created_at),
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentBody {
    pub body: String,
}

/// GET /api/posts/:id/comments - all comments on a post, oldest first.
pub async fn list_comments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Vec<CommentView>>, ApiError> {
    PostRepository::new(state.pool.clone())
        .find_author(post_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

    let comments = CommentRepository::new(state.pool.clone())
        .list_for_post(post_id)
        .await?;
    Ok(Json(comments.into_iter().map(CommentView::from).collect()))
}

/// POST /api/posts/:id/comments - add a comment, notifying the post owner.
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<Uuid>,
    Json(payload): Json<CreateCommentBody>,
) -> Result<(StatusCode, Json<CommentView>), ApiError> {
    let body = payload.body.trim().to_string();
    if body.is_empty() {
        return Err(ApiError::Validation(
            "Comment cannot be empty".to_string(),
        ));
    }

    let comment = CommentRepository::new(state.pool.clone())
        .create(post_id, auth.user_id, &body)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

    let author = UserRepository::new(state.pool.clone())
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Account not found".to_string()))?;

    let view = CommentView {
        id: comment.id,
        post_id: comment.post_id,
        author: AuthorSummary {
            id: author.id,
            name: author.name,
            avatar: author.avatar,
            emoji: author.emoji,
            theme_color: author.theme_color,
        },
        body: comment.body,
        time: relative_time(comment.created_at),
        created_at: comment.created_at,
    };

    Ok((StatusCode::CREATED, Json(view)))
}
