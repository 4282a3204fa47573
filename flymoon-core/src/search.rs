use serde::{Deserialize, Serialize};

/// Bumped whenever the cached shape changes so stale sessions from an older
/// deploy fail the version check instead of deserializing wrongly.
pub const SEARCH_PARAMS_VERSION: u16 = 1;

fn current_version() -> u16 {
    SEARCH_PARAMS_VERSION
}

/// A flight search as the visitor expressed it. This is what gets cached in
/// the session so the results page can re-run or refine the search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchParams {
    #[serde(default = "current_version")]
    pub version: u16,
    pub origin: String,
    pub destination: String,
    pub outbound_date: String,
    pub inbound_date: Option<String>,
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
    pub cabin_class: Option<String>,
    pub is_direct: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            version: SEARCH_PARAMS_VERSION,
            origin: String::new(),
            destination: String::new(),
            outbound_date: String::new(),
            inbound_date: None,
            adults: 1,
            children: 0,
            infants: 0,
            cabin_class: None,
            is_direct: false,
        }
    }
}

impl SearchParams {
    pub fn is_round_trip(&self) -> bool {
        self.inbound_date.as_deref().is_some_and(|d| !d.is_empty())
    }
}

// ============================================================================
// Supplier Wire Request
// ============================================================================

/// One leg of an express search: outbound and, for round trips, the return
/// date on the same row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchTrip {
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "To")]
    pub to: String,
    #[serde(rename = "OnwardDate")]
    pub onward_date: String,
    #[serde(rename = "ReturnDate")]
    pub return_date: String,
}

/// The supplier's `ExpressSearch` request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpressSearchRequest {
    #[serde(rename = "ADT")]
    pub adults: u32,
    #[serde(rename = "CHD")]
    pub children: u32,
    #[serde(rename = "INF")]
    pub infants: u32,
    #[serde(rename = "Cabin")]
    pub cabin: String,
    /// "ON" for one-way, "RT" for round trip.
    #[serde(rename = "FareType")]
    pub fare_type: String,
    #[serde(rename = "IsDirect")]
    pub is_direct: bool,
    #[serde(rename = "Trips")]
    pub trips: Vec<SearchTrip>,
}

impl ExpressSearchRequest {
    /// Maps visitor search params onto the supplier request. The cabin
    /// defaults to economy when the visitor did not pick one.
    pub fn from_params(params: &SearchParams) -> Self {
        let fare_type = if params.is_round_trip() { "RT" } else { "ON" };
        Self {
            adults: params.adults,
            children: params.children,
            infants: params.infants,
            cabin: params.cabin_class.clone().unwrap_or_else(|| "E".to_owned()),
            fare_type: fare_type.to_owned(),
            is_direct: params.is_direct,
            trips: vec![SearchTrip {
                from: params.origin.clone(),
                to: params.destination.clone(),
                onward_date: params.outbound_date.clone(),
                return_date: params.inbound_date.clone().unwrap_or_default(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_way() -> SearchParams {
        SearchParams {
            origin: "RUH".into(),
            destination: "JED".into(),
            outbound_date: "2026-03-15".into(),
            adults: 2,
            ..Default::default()
        }
    }

    #[test]
    fn one_way_maps_to_on_fare_type() {
        let request = ExpressSearchRequest::from_params(&one_way());
        assert_eq!(request.fare_type, "ON");
        assert_eq!(request.trips.len(), 1);
        assert_eq!(request.trips[0].from, "RUH");
        assert_eq!(request.trips[0].return_date, "");
        assert_eq!(request.cabin, "E");
        assert_eq!(request.adults, 2);
    }

    #[test]
    fn round_trip_maps_to_rt_with_return_date() {
        let mut params = one_way();
        params.inbound_date = Some("2026-03-22".into());
        params.cabin_class = Some("B".into());
        let request = ExpressSearchRequest::from_params(&params);
        assert_eq!(request.fare_type, "RT");
        assert_eq!(request.trips[0].return_date, "2026-03-22");
        assert_eq!(request.cabin, "B");
    }

    #[test]
    fn empty_inbound_date_still_counts_as_one_way() {
        let mut params = one_way();
        params.inbound_date = Some(String::new());
        assert!(!params.is_round_trip());
        assert_eq!(ExpressSearchRequest::from_params(&params).fare_type, "ON");
    }

    #[test]
    fn wire_request_uses_supplier_field_names() {
        let request = ExpressSearchRequest::from_params(&one_way());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["ADT"], 2);
        assert_eq!(json["FareType"], "ON");
        assert_eq!(json["Trips"][0]["OnwardDate"], "2026-03-15");
        assert_eq!(json["IsDirect"], false);
    }

    #[test]
    fn cached_params_default_to_current_version() {
        let parsed: SearchParams =
            serde_json::from_str(r#"{"origin": "RUH", "destination": "JED"}"#).unwrap();
        assert_eq!(parsed.version, SEARCH_PARAMS_VERSION);
        assert_eq!(parsed.adults, 1);
    }
}
