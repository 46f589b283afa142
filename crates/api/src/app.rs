use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_auth, security_headers_middleware, trace_id,
};
use crate::routes::{auth, comments, health, invites, notifications, posts, profile, stats, users};
use crate::services::UploadStore;
use shared::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    pub uploads: UploadStore,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let jwt = Arc::new(JwtConfig::new(
        &config.jwt.secret,
        config.jwt.token_expiry_secs,
    ));
    let uploads = UploadStore::new(&config.uploads.dir, config.limits.max_upload_bytes);
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        jwt,
        uploads,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Everything behind session authentication. The body limit leaves
    // headroom over the upload cap for the multipart framing.
    let protected_routes = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/profile", put(profile::update_profile))
        .route("/api/profile/avatar", post(profile::upload_avatar))
        .route("/api/users", get(users::list_users))
        .route("/api/users/:user_id", get(users::get_user))
        .route("/api/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/api/posts/:post_id",
            get(posts::get_post).delete(posts::delete_post),
        )
        .route("/api/posts/:post_id/like", post(posts::toggle_like))
        .route(
            "/api/posts/:post_id/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/api/posts/user/:user_id", get(posts::list_user_posts))
        .route(
            "/api/invites",
            get(invites::list_invites).post(invites::create_invite),
        )
        .route("/api/notifications", get(notifications::list_notifications))
        .route("/api/notifications/read", post(notifications::mark_all_read))
        .route("/api/stats", get(stats::get_stats))
        .layer(DefaultBodyLimit::max(
            config.limits.max_upload_bytes + 64 * 1024,
        ))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/check-invite/:token", get(auth::check_invite))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .nest_service("/uploads", ServeDir::new(&config.uploads.dir))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(trace_id))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
