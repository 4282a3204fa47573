use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::payload::BookingPayload;
use crate::search::ExpressSearchRequest;

/// Message shown when neither the upstream body nor the transport layer
/// produced anything human-readable.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

// ============================================================================
// Failure Normalization
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never produced an HTTP response (DNS, connect, timeout,
    /// or an unreadable body).
    Transport,
    /// The upstream answered with a non-success status.
    Upstream,
}

/// Single error type crossing the API seam. Every failure mode of a call to
/// the booking supplier collapses into one of these before anyone else sees
/// it, so callers never touch transport-level error types.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct UpstreamFailure {
    pub kind: FailureKind,
    /// Upstream HTTP status, when one was received.
    pub status: Option<u16>,
    pub message: String,
}

impl UpstreamFailure {
    pub fn transport(error: impl std::fmt::Display) -> Self {
        Self {
            kind: FailureKind::Transport,
            status: None,
            message: failure_message(&Value::Null, Some(&error.to_string())),
        }
    }

    pub fn upstream(status: u16, body: &Value) -> Self {
        Self {
            kind: FailureKind::Upstream,
            status: Some(status),
            message: failure_message(body, None),
        }
    }
}

/// Picks the most specific failure text available: a `message` field in the
/// upstream body, then an `error` field, then the transport error, then the
/// generic fallback. Empty strings count as absent.
pub fn failure_message(body: &Value, transport_error: Option<&str>) -> String {
    for key in ["message", "Message", "error", "Error"] {
        if let Some(text) = body.get(key).and_then(Value::as_str) {
            if !text.is_empty() {
                return text.to_owned();
            }
        }
    }
    if let Some(text) = transport_error {
        if !text.is_empty() {
            return text.to_owned();
        }
    }
    GENERIC_FAILURE_MESSAGE.to_owned()
}

// ============================================================================
// Supplier API Seam
// ============================================================================

/// The full surface this application needs from the booking supplier.
/// Responses stay as raw `Value` so handlers can forward them verbatim;
/// typed projections happen in `extract` and `checklist`.
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// Run an availability search for the given trip.
    async fn express_search(&self, request: &ExpressSearchRequest) -> Result<Value, UpstreamFailure>;

    /// Re-price a held itinerary by its booking reference.
    async fn price_check(&self, reference: &str) -> Result<Value, UpstreamFailure>;

    /// Fetch which traveller document fields the itinerary requires.
    async fn travel_checklist(&self, tui: &str) -> Result<Value, UpstreamFailure>;

    /// Create the booking. The payload is sent exactly as built.
    async fn create_booking(&self, payload: &BookingPayload) -> Result<Value, UpstreamFailure>;

    /// Site-wide settings published by the supplier portal.
    async fn web_settings(&self) -> Result<Value, UpstreamFailure>;
}
