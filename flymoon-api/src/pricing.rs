use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/flights/price", post(price_check))
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub(crate) struct PriceCheckBody {
    #[serde(rename = "bookingID")]
    booking_id: Option<String>,
}

/// POST /api/flights/price
async fn price_check(
    State(state): State<AppState>,
    Json(body): Json<PriceCheckBody>,
) -> Result<Json<Value>, AppError> {
    let booking_id = body
        .booking_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            AppError::ValidationError("Missing required parameters: bookingID".to_string())
        })?;

    tracing::debug!(%booking_id, "forwarding price check");
    let priced = state
        .upstream
        .price_check(&booking_id)
        .await
        .map_err(AppError::UpstreamError)?;

    // The supplier's pricing response goes back untouched.
    Ok(Json(priced))
}
