use anyhow::Result;
use tracing::info;

mod app;
mod config;
mod error;
mod extractors;
mod middleware;
mod routes;
mod services;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging
    middleware::logging::init_logging(&config.logging);

    info!("Starting FriendCircle API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize metrics recorder
    middleware::init_metrics();

    // Create database pool
    let pool =
        persistence::db::create_pool(&config.database.url, &config.database.pool_settings())
            .await?;

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    // Make sure the upload directories exist before serving from them
    let uploads = services::UploadStore::new(&config.uploads.dir, config.limits.max_upload_bytes);
    uploads.ensure_dirs().await?;

    // Build application
    let app = app::create_app(config.clone(), pool);

    // Start server
    let addr = config.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
