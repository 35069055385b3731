use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::App;

pub fn router(app: Arc<App>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stats/tvl", get(latest_tvl))
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// Latest persisted TVL. 404 until the first pass has been stored.
pub async fn latest_tvl(State(app): State<Arc<App>>) -> (StatusCode, Json<Value>) {
    let store = app.store().clone();

    let latest = match tokio::task::spawn_blocking(move || store.latest()).await {
        Ok(res) => res,
        Err(e) => Err(e.into()),
    };

    match latest {
        Ok(Some(record)) => (
            StatusCode::OK,
            Json(json!({
                "totalValueUsd": record.value,
                "lastUpdated": record.computed_at,
            })),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "TVL data not available" })),
        ),
        Err(e) => {
            error!(error = %format!("{e:#}"), "error fetching tvl");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error fetching TVL" })),
            )
        }
    }
}
