//! Common test utilities for integration tests.
//!
//! Integration tests run against a real PostgreSQL database named by the
//! `TEST_DATABASE_URL` environment variable. When the variable is unset
//! the tests skip themselves so the suite passes without a database.

// Helper utilities shared across test binaries; not every binary uses
// every helper.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use friendcircle_api::{app::create_app, config::Config};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::OnceLock;
use std::time::Duration;
use tower::ServiceExt;

static DB_LOCK: OnceLock<tokio::sync::Mutex<()>> = OnceLock::new();

/// Serializes tests that reset or depend on whole-database state.
pub async fn db_lock() -> tokio::sync::MutexGuard<'static, ()> {
    DB_LOCK
        .get_or_init(|| tokio::sync::Mutex::new(()))
        .lock()
        .await
}

/// A fully wired test application over a real database.
pub struct TestContext {
    pub app: Router,
    pub pool: PgPool,
}

/// Connects to the test database and builds the application, or returns
/// `None` when `TEST_DATABASE_URL` is not set.
pub async fn setup() -> Option<TestContext> {
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    run_migrations(&pool).await;

    let uploads_dir = std::env::temp_dir().join("friendcircle-test-uploads");
    std::fs::create_dir_all(uploads_dir.join("avatars")).expect("Failed to create uploads dir");
    std::fs::create_dir_all(uploads_dir.join("posts")).expect("Failed to create uploads dir");
    let uploads_dir = uploads_dir.to_string_lossy().to_string();

    let config = Config::load_from_defaults(&[
        ("database.url", database_url.as_str()),
        ("jwt.secret", "integration-test-secret"),
        ("uploads.dir", uploads_dir.as_str()),
    ])
    .expect("Failed to build test config");

    let app = create_app(config, pool.clone());
    Some(TestContext { app, pool })
}

/// Applies the migration files in order. Already-applied statements fail
/// silently, so repeated runs are harmless.
pub async fn run_migrations(pool: &PgPool) {
    let migration_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("persistence/src/migrations");

    let mut entries: Vec<_> = std::fs::read_dir(&migration_dir)
        .expect("Failed to read migrations directory")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|ext| ext == "sql").unwrap_or(false))
        .collect();

    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let sql = std::fs::read_to_string(entry.path()).expect("Failed to read migration file");
        let _ = sqlx::raw_sql(&sql).execute(pool).await;
    }
}

/// Empties every table so a test can control global state such as the
/// first-account-is-admin rule.
pub async fn reset_database(pool: &PgPool) {
    sqlx::query("TRUNCATE users, posts, comments, likes, invites, notifications CASCADE")
        .execute(pool)
        .await
        .expect("Failed to reset test database");
}

/// Sends one request through the router and parses the JSON response.
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Registers an account and returns its session token and id.
///
/// Pass `invite_token` for every account after the first.
pub async fn register_user(
    app: &Router,
    name: &str,
    email: &str,
    password: &str,
    invite_token: Option<&str>,
) -> (String, uuid::Uuid) {
    let mut body = json!({
        "name": name,
        "email": email,
        "password": password,
    });
    if let Some(token) = invite_token {
        body["invite_token"] = json!(token);
    }

    let (status, response) = request(app, Method::POST, "/api/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {}", response);

    let token = response["token"].as_str().unwrap().to_string();
    let user_id = response["user"]["id"].as_str().unwrap().parse().unwrap();
    (token, user_id)
}

/// Issues an invite as `inviter` and returns the invite token.
pub async fn issue_invite(app: &Router, inviter_token: &str, email: &str) -> String {
    let (status, response) = request(
        app,
        Method::POST,
        "/api/invites",
        Some(inviter_token),
        Some(json!({ "email": email })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "invite failed: {}", response);
    response["token"].as_str().unwrap().to_string()
}

/// A unique email for this test run.
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, uuid::Uuid::new_v4().simple())
}
