use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::payload::BookingPayload;

/// Outcome tag stored next to a submission record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatusTag {
    Created,
    Failed,
}

/// What actually happened to a submission: the payload that was sent plus
/// either the raw supplier response or the normalized error message. This is
/// what the confirmation and failure screens read back out of the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub status: BookingStatusTag,
    pub payload: BookingPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BookingRecord {
    pub fn created(payload: BookingPayload, response: Value) -> Self {
        Self {
            status: BookingStatusTag::Created,
            payload,
            response: Some(response),
            error: None,
        }
    }

    pub fn failed(payload: BookingPayload, error: String) -> Self {
        Self {
            status: BookingStatusTag::Failed,
            payload,
            response: None,
            error: Some(error),
        }
    }
}

/// A priced itinerary as cached between the pricing call and submission.
/// `raw` keeps the full supplier response; `net_amount` is lifted out
/// because the payload builder needs it constantly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PricingSnapshot {
    pub tui: String,
    pub net_amount: Option<f64>,
    pub raw: Value,
}

impl PricingSnapshot {
    pub fn from_response(tui: &str, raw: Value) -> Self {
        Self {
            tui: tui.to_owned(),
            net_amount: raw["NetAmount"].as_f64(),
            raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::BookingForm;
    use crate::payload::build_payload;
    use serde_json::json;

    fn payload() -> BookingPayload {
        build_payload("TUI-9", &BookingForm::default(), vec![], 500.0)
    }

    #[test]
    fn created_record_carries_response_without_error() {
        let record = BookingRecord::created(payload(), json!({"TransactionID": 1}));
        assert_eq!(record.status, BookingStatusTag::Created);
        assert!(record.response.is_some());
        assert!(record.error.is_none());
        let wire = serde_json::to_value(&record).unwrap();
        assert_eq!(wire["status"], "created");
        assert!(wire.get("error").is_none());
    }

    #[test]
    fn failed_record_carries_error_without_response() {
        let record = BookingRecord::failed(payload(), "Fare expired".into());
        assert_eq!(record.status, BookingStatusTag::Failed);
        assert_eq!(record.error.as_deref(), Some("Fare expired"));
        assert!(record.response.is_none());
        let wire = serde_json::to_value(&record).unwrap();
        assert_eq!(wire["status"], "failed");
        assert!(wire.get("response").is_none());
    }

    #[test]
    fn pricing_snapshot_lifts_net_amount() {
        let snapshot =
            PricingSnapshot::from_response("TUI-4", json!({"NetAmount": 1480.5, "Status": "OK"}));
        assert_eq!(snapshot.net_amount, Some(1480.5));
        assert_eq!(snapshot.raw["Status"], "OK");
    }

    #[test]
    fn pricing_snapshot_tolerates_missing_amount() {
        let snapshot = PricingSnapshot::from_response("TUI-4", json!({}));
        assert_eq!(snapshot.net_amount, None);
    }
}
