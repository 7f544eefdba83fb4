//! SalaryBoard
//!
//! Main application entry point

use std::time::Duration;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use SalaryBoard::{
    config::Settings,
    utils::logging,
    database::{DatabaseService, create_pool, run_migrations},
    routes::{app_router, serve, shutdown_signal},
    state::AppState,
};

/// How often idle rate limiter entries are dropped
const RATE_LIMIT_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", SalaryBoard::info());

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = create_pool(&settings.database).await?;

    if settings.database.run_migrations {
        run_migrations(&db_pool).await?;
    }

    let database_service = DatabaseService::new(db_pool);
    let state = AppState::new(database_service, &settings)?;

    if let Some(limiter) = state.rate_limiter.clone() {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(RATE_LIMIT_PRUNE_INTERVAL);
            loop {
                interval.tick().await;
                limiter.retain_recent();
            }
        });
    }

    let router = app_router(state);
    let address = settings.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;

    serve(listener, router, shutdown_signal()).await?;

    info!("SalaryBoard has been shut down.");
    Ok(())
}
