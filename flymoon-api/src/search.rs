use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use flymoon_core::search::{ExpressSearchRequest, SearchParams};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/flights/search", post(search_flights))
}

/// Body of `POST /api/flights/search`. Everything is optional at the edge;
/// validation decides what is actually missing so the error can name every
/// absent parameter at once.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct SearchQuery {
    origin: Option<String>,
    destination: Option<String>,
    outbound_date: Option<String>,
    inbound_date: Option<String>,
    adults: Option<u32>,
    children: Option<u32>,
    infants: Option<u32>,
    cabin_class: Option<String>,
    is_direct: Option<bool>,
}

impl SearchQuery {
    fn into_params(self) -> Result<SearchParams, String> {
        let mut missing = Vec::new();
        if is_blank(&self.origin) {
            missing.push("origin");
        }
        if is_blank(&self.destination) {
            missing.push("destination");
        }
        if is_blank(&self.outbound_date) {
            missing.push("outboundDate");
        }
        if !missing.is_empty() {
            return Err(format!(
                "Missing required parameters: {}",
                missing.join(", ")
            ));
        }
        Ok(SearchParams {
            origin: self.origin.unwrap_or_default(),
            destination: self.destination.unwrap_or_default(),
            outbound_date: self.outbound_date.unwrap_or_default(),
            inbound_date: self.inbound_date,
            adults: self.adults.unwrap_or(1),
            children: self.children.unwrap_or(0),
            infants: self.infants.unwrap_or(0),
            cabin_class: self.cabin_class,
            is_direct: self.is_direct.unwrap_or(false),
            ..SearchParams::default()
        })
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().unwrap_or("").is_empty()
}

/// POST /api/flights/search
async fn search_flights(
    State(state): State<AppState>,
    Json(query): Json<SearchQuery>,
) -> Result<Json<Value>, AppError> {
    // 1. Validate before any outbound call.
    let params = query.into_params().map_err(AppError::ValidationError)?;

    // 2. Map onto the supplier's wire request.
    let request = ExpressSearchRequest::from_params(&params);
    tracing::debug!(
        origin = %params.origin,
        destination = %params.destination,
        fare_type = %request.fare_type,
        "forwarding flight search"
    );

    // 3. Forward; the response passes through verbatim inside the wrapper.
    let results = state
        .upstream
        .express_search(&request)
        .await
        .map_err(AppError::UpstreamError)?;

    Ok(Json(json!({ "success": true, "data": results })))
}
