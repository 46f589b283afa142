//! Feed endpoints: posts, likes and per-author listings.

use axum::{
    extract::{FromRequest, Multipart, Path, Query, Request, State},
    http::{header, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use domain::models::Post;
use domain::time::relative_time;
use persistence::entities::PostFeedEntity;
use persistence::repositories::{PostRepository, UserRepository};
use shared::pagination::{PageParams, PageQuery};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::services::uploads::UploadKind;

/// Author fields embedded in feed rows.
#[derive(Debug, Serialize)]
pub struct AuthorSummary {
    pub id: Uuid,
    pub name: String,
    pub avatar: String,
    pub emoji: String,
    pub theme_color: String,
}

#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: Uuid,
    pub author: AuthorSummary,
    pub body: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub likes_count: i64,
    pub comments_count: i64,
    pub liked_by_me: bool,
    /// Short human-readable age ("now", "5min", "3h", "2d").
    pub time: String,
}

impl From<PostFeedEntity> for PostView {
    fn from(entity: PostFeedEntity) -> Self {
        Self {
            id: entity.id,
            author: AuthorSummary {
                id: entity.user_id,
                name: entity.author_name,
                avatar: entity.author_avatar,
                emoji: entity.author_emoji,
                theme_color: entity.author_theme_color,
            },
            body: entity.body,
            image: entity.image,
            time: relative_time(entity.created_at),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            likes_count: entity.likes_count,
            comments_count: entity.comments_count,
            liked_by_me: entity.liked_by_me,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostsPage {
    pub posts: Vec<PostView>,
    pub total: i64,
    pub pages: i64,
    pub current_page: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostBody {
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub liked: bool,
    pub likes_count: i64,
}

/// GET /api/posts - the shared feed, newest first, paginated.
pub async fn list_posts(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<PostsPage>, ApiError> {
    let params = PageParams::from_query(&query);
    let repo = PostRepository::new(state.pool.clone());

    let posts = repo
        .list_page(auth.user_id, params.per_page, params.offset())
        .await?;
    let total = repo.count().await?;

    Ok(Json(PostsPage {
        posts: posts.into_iter().map(PostView::from).collect(),
        total,
        pages: params.page_count(total),
        current_page: params.page,
    }))
}

/// POST /api/posts - create a post.
///
/// Accepts either a JSON body (`{ "body": "..." }`) or multipart form
/// data with a text `body` part and an optional `image` file part.
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    req: Request,
) -> Result<(StatusCode, Json<PostView>), ApiError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let (body, image) = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(req, &state)
            .await
            .map_err(|e| ApiError::Validation(format!("invalid multipart body: {}", e)))?;
        read_post_form(&state, auth.user_id, multipart).await?
    } else {
        let Json(payload) = Json::<CreatePostBody>::from_request(req, &state)
            .await
            .map_err(|e| ApiError::Validation(format!("invalid request body: {}", e)))?;
        (payload.body, String::new())
    };

    let body = body.trim().to_string();
    if !Post::has_content(&body, &image) {
        return Err(ApiError::Validation(
            "Post must have text or an image".to_string(),
        ));
    }

    let repo = PostRepository::new(state.pool.clone());
    let post = repo.create(auth.user_id, &body, &image).await?;
    let view = repo
        .find_feed_by_id(auth.user_id, post.id)
        .await?
        .ok_or_else(|| ApiError::Internal("created post not found".to_string()))?;

    Ok((StatusCode::CREATED, Json(view.into())))
}

async fn read_post_form(
    state: &AppState,
    user_id: Uuid,
    mut multipart: Multipart,
) -> Result<(String, String), ApiError> {
    let mut body = String::new();
    let mut image = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("invalid multipart body: {}", e)))?
    {
        match field.name() {
            Some("body") => {
                body = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Validation(format!("failed to read body: {}", e)))?;
            }
            Some("image") => {
                let Some(filename) = field.file_name().map(str::to_string) else {
                    continue;
                };
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Validation(format!("failed to read upload: {}", e)))?;
                if !bytes.is_empty() {
                    image = state
                        .uploads
                        .save(UploadKind::PostImage, user_id, &filename, &bytes)
                        .await?;
                }
            }
            _ => {}
        }
    }

    Ok((body, image))
}

/// GET /api/posts/:id - one post, annotated for the caller.
pub async fn get_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<PostView>, ApiError> {
    let post = PostRepository::new(state.pool.clone())
        .find_feed_by_id(auth.user_id, post_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;
    Ok(Json(post.into()))
}

/// DELETE /api/posts/:id - owner or admin only.
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = PostRepository::new(state.pool.clone());
    let author_id = repo
        .find_author(post_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

    if author_id != auth.user_id {
        let caller = UserRepository::new(state.pool.clone())
            .find_by_id(auth.user_id)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Account not found".to_string()))?;
        if !caller.is_admin {
            return Err(ApiError::Forbidden(
                "You can only delete your own posts".to_string(),
            ));
        }
    }

    repo.delete(post_id).await?;
    Ok(Json(json!({ "message": "Post deleted" })))
}

/// POST /api/posts/:id/like - toggle the caller's like.
pub async fn toggle_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<LikeResponse>, ApiError> {
    let toggle = PostRepository::new(state.pool.clone())
        .toggle_like(post_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;
    Ok(Json(LikeResponse {
        liked: toggle.liked,
        likes_count: toggle.likes_count,
    }))
}

/// GET /api/posts/user/:user_id - one member's posts, paginated.
pub async fn list_user_posts(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PostsPage>, ApiError> {
    UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let params = PageParams::from_query(&query);
    let repo = PostRepository::new(state.pool.clone());

    let posts = repo
        .list_by_author(auth.user_id, user_id, params.per_page, params.offset())
        .await?;
    let total = repo.count_by_author(user_id).await?;

    Ok(Json(PostsPage {
        posts: posts.into_iter().map(PostView::from).collect(),
        total,
        pages: params.page_count(total),
        current_page: params.page,
    }))
}
