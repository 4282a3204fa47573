use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// SSR code the supplier uses for baggage allowance lines.
pub const SSR_BAGGAGE_CODE: &str = "BAG";

/// Status the supplier reports for a booking held unticketed.
pub const STATUS_ON_HOLD: &str = "OH";

/// Monetary and reference fields lifted off a booking or pricing response.
/// Everything is optional; suppliers omit fields freely between channels.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingSummary {
    pub tui: Option<String>,
    pub transaction_id: Option<i64>,
    pub booking_ref: Option<String>,
    pub status: Option<String>,
    pub net_amount: Option<f64>,
    pub gross_amount: Option<f64>,
    pub currency: Option<String>,
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FlightSegment {
    pub airline: String,
    pub flight_no: String,
    pub departure_code: String,
    pub arrival_code: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: Option<String>,
    pub cabin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BaggageAllowance {
    pub description: String,
    pub ptc: Option<String>,
    pub charge: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FareRuleSection {
    pub sector: Option<String>,
    pub heading: String,
    pub notes: Vec<String>,
}

/// Everything the confirmation screens need, projected once from the raw
/// booking response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    pub summary: BookingSummary,
    pub segments: Vec<FlightSegment>,
    pub baggage: Vec<BaggageAllowance>,
    pub fare_rules: Vec<FareRuleSection>,
    pub on_hold: bool,
    pub extracted_at: DateTime<Utc>,
}

/// Projects a raw booking response into [`BookingDetails`]. Absent or
/// misshapen sections degrade to empty values; this never fails.
pub fn extract_booking_details(response: &Value) -> BookingDetails {
    BookingDetails {
        summary: summary(response),
        segments: flight_segments(response),
        baggage: baggage_allowances(response),
        fare_rules: fare_rules(response),
        on_hold: is_on_hold(response),
        extracted_at: Utc::now(),
    }
}

pub fn summary(response: &Value) -> BookingSummary {
    BookingSummary {
        tui: string_field(response, "TUI"),
        transaction_id: response["TransactionID"].as_i64(),
        booking_ref: string_field(response, "BookingRefID"),
        status: string_field(response, "Status"),
        net_amount: response["NetAmount"].as_f64(),
        gross_amount: response["GrossAmount"].as_f64(),
        currency: string_field(response, "CurrencyCode"),
        adults: count_field(response, "ADT"),
        children: count_field(response, "CHD"),
        infants: count_field(response, "INF"),
    }
}

/// Flattens `Trips[].Journey[].Segments[]` into a single ordered list.
pub fn flight_segments(response: &Value) -> Vec<FlightSegment> {
    let mut segments = Vec::new();
    for trip in array(&response["Trips"], "Trips") {
        for journey in array(&trip["Journey"], "Journey") {
            for segment in array(&journey["Segments"], "Segments") {
                // Some channels nest the flight under `Flight`, others inline it.
                let flight = if segment["Flight"].is_object() {
                    &segment["Flight"]
                } else {
                    segment
                };
                segments.push(FlightSegment {
                    airline: string_field(flight, "MAC").unwrap_or_default(),
                    flight_no: string_field(flight, "FlightNo").unwrap_or_default(),
                    departure_code: string_field(flight, "DepartureCode").unwrap_or_default(),
                    arrival_code: string_field(flight, "ArrivalCode").unwrap_or_default(),
                    departure_time: string_field(flight, "DepartureTime").unwrap_or_default(),
                    arrival_time: string_field(flight, "ArrivalTime").unwrap_or_default(),
                    duration: string_field(flight, "Duration"),
                    cabin: string_field(flight, "Cabin"),
                });
            }
        }
    }
    segments
}

/// Baggage lines only; the SSR array also carries meals and seats.
pub fn baggage_allowances(response: &Value) -> Vec<BaggageAllowance> {
    array(&response["SSR"], "SSR")
        .iter()
        .filter(|item| item["Code"].as_str() == Some(SSR_BAGGAGE_CODE))
        .map(|item| BaggageAllowance {
            description: string_field(item, "Description").unwrap_or_default(),
            ptc: string_field(item, "PTC"),
            charge: item["Charge"].as_f64().unwrap_or(0.0),
        })
        .collect()
}

/// Flattens `Rules[].Rule[]` into sections; each keeps its sector label.
pub fn fare_rules(response: &Value) -> Vec<FareRuleSection> {
    let mut sections = Vec::new();
    for rule_group in array(&response["Rules"], "Rules") {
        let sector = string_field(rule_group, "OrginDestination");
        for rule in array(&rule_group["Rule"], "Rule") {
            let notes = array(&rule["Info"], "Info")
                .iter()
                .filter_map(|note| note.as_str().map(str::to_owned))
                .collect();
            sections.push(FareRuleSection {
                sector: sector.clone(),
                heading: string_field(rule, "Head").unwrap_or_default(),
                notes,
            });
        }
    }
    sections
}

pub fn is_on_hold(response: &Value) -> bool {
    response["Status"].as_str() == Some(STATUS_ON_HOLD)
}

fn array<'a>(value: &'a Value, section: &str) -> &'a [Value] {
    match value {
        Value::Array(items) => items,
        Value::Null => &[],
        _ => {
            tracing::debug!("ignoring non-array {} section in booking response", section);
            &[]
        }
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value[key].as_str().map(str::to_owned)
}

fn count_field(value: &Value, key: &str) -> u32 {
    value[key].as_u64().unwrap_or(0) as u32
}
