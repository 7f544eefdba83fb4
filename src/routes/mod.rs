//! HTTP routing
//!
//! Builds the application router and runs it on a listener.

use std::future::Future;
use std::net::SocketAddr;
use axum::middleware;
use axum::routing::{get, post, MethodRouter};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use crate::handlers::{health, submissions, technologies};
use crate::middleware::{log_requests, rate_limit};
use crate::state::AppState;

/// Writes are quota-limited per client when a limiter is configured
fn limited(route: MethodRouter<AppState>, state: &AppState) -> MethodRouter<AppState> {
    match state.rate_limiter.clone() {
        Some(limiter) => route.route_layer(middleware::from_fn_with_state(limiter, rate_limit)),
        None => route,
    }
}

pub fn app_router(state: AppState) -> Router {
    let create_submission = limited(post(submissions::create_submission), &state);
    let create_technology = limited(post(technologies::create_technology), &state);

    Router::new()
        .route("/submissions", get(submissions::list_submissions).merge(create_submission))
        .route("/submissions/:id", get(submissions::get_submission))
        .route("/technologies", get(technologies::list_technologies).merge(create_technology))
        .route("/technologies/search", get(technologies::search_technologies))
        .route("/health", get(health::health))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Serve until `shutdown` resolves, exposing peer addresses to the rate limiter
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!(address = %listener.local_addr()?, "Listening");
    axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
