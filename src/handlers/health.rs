use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;
use crate::state::AppState;

/// `GET /health`: 200 with counts when the database answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> Response {
    if let Err(e) = state.database.health_check().await {
        return e.into_response();
    }

    let stats = match state.database.get_system_stats().await {
        Ok(stats) => Some(stats),
        Err(e) => {
            warn!(error = %e, "Failed to collect system stats");
            None
        }
    };

    Json(json!({
        "status": "ok",
        "version": crate::VERSION,
        "stats": stats,
    }))
    .into_response()
}
