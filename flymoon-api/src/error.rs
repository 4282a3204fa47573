use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use flymoon_core::api::UpstreamFailure;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    UpstreamError(UpstreamFailure),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::UpstreamError(failure) => {
                // Mirror the upstream status when we have one; a request
                // that never got a response reads as a bad gateway.
                let status = failure
                    .status
                    .and_then(|code| StatusCode::from_u16(code).ok())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                (status, json!({ "success": false, "error": failure.message }))
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal Server Error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Anyhow(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_keeps_the_received_status() {
        let failure = UpstreamFailure::upstream(402, &json!({"message": "Fare expired"}));
        let response = AppError::UpstreamError(failure).into_response();
        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    }

    #[test]
    fn transport_error_maps_to_bad_gateway() {
        let failure = UpstreamFailure::transport("connection refused");
        let response = AppError::UpstreamError(failure).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn validation_error_is_a_bad_request() {
        let response = AppError::ValidationError("Missing required parameters: bookingID".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
