//! dentamap server binary
//!
//! Bootstrap order: tracing, configuration, database pool, external-service
//! clients, router, listener.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dentamap::auth::{AllowlistPolicy, HttpTokenVerifier};
use dentamap::services::HttpImageHost;
use dentamap::{AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting dentamap");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Optional config file path as first CLI argument
    let cli_config = std::env::args().nth(1).map(PathBuf::from);
    let config = Config::load(cli_config.as_deref())?;

    if config.auth.admin_email.is_empty() {
        anyhow::bail!("No admin email configured (set DENTAMAP_ADMIN_EMAIL or [auth] admin_email)");
    }

    // Database
    let db_pool = dentamap::db::init_database_pool(&config.database.path).await?;
    info!("Database: {}", config.database.path.display());

    // External collaborators share one HTTP client
    let http = reqwest::Client::new();

    let verifier = HttpTokenVerifier::new(
        http.clone(),
        config.auth.verify_url.clone(),
        &config.auth.credentials_path,
    )
    .context("Failed to initialize identity-provider client")?;

    let image_host = HttpImageHost::new(
        http,
        config.images.upload_url.clone(),
        config.images.api_key.clone(),
    );

    let state = AppState::new(
        db_pool,
        Arc::new(verifier),
        Arc::new(AllowlistPolicy::new(config.auth.admin_email.clone())),
        Arc::new(image_host),
        config.images.ingest_concurrency,
        config.public_api_url.clone(),
    );

    let app = dentamap::build_router(state);

    let bind = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    info!("Listening on http://{bind}");
    info!("Health check: http://{bind}/health");

    axum::serve(listener, app).await?;

    Ok(())
}
