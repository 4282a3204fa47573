use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/search", post(site_search))
        .route("/api/suggestions", get(suggestions))
}

/// POST /api/search
///
/// Placeholder for package and hotel search. Wired so the front end can
/// call it today; returns an empty shell until the feature lands.
async fn site_search() -> Json<Value> {
    Json(json!({ "results": [], "total": 0 }))
}

/// GET /api/suggestions
async fn suggestions() -> Json<Value> {
    Json(json!({ "suggestions": [] }))
}
