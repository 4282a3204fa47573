use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use flymoon_core::checklist::TravellerRequirements;
use flymoon_core::extract::BookingDetails;
use flymoon_core::form::BookingForm;
use flymoon_core::record::{BookingRecord, PricingSnapshot};
use flymoon_core::search::SearchParams;

use crate::storage::{MemoryStore, StoragePort};

const KEY_SEARCH_PARAMS: &str = "search_params";
const KEY_TRAVEL_DATA: &str = "travel_data";
const KEY_PASSENGER_DATA: &str = "passenger_data";
const KEY_PRICING_DATA: &str = "pricing_data";
const KEY_BOOKING_DATA: &str = "booking_data";
const KEY_FLIGHT_DETAILS: &str = "flight_details";

/// A cached payload plus the moment it was written. Serialized flat, so the
/// stored JSON is the payload's own fields with one extra `timestamp` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stored<T> {
    #[serde(flatten)]
    pub payload: T,
    pub timestamp: DateTime<Utc>,
}

impl<T> Stored<T> {
    pub fn age(&self) -> Duration {
        Utc::now() - self.timestamp
    }

    pub fn is_fresh(&self, max_age: Duration) -> bool {
        self.age() <= max_age
    }
}

/// The per-visitor session: six independent slots keyed by journey stage.
/// Entries never expire on their own; they are overwritten by the next
/// journey or cleared explicitly.
///
/// Storage trouble is deliberately non-fatal. A failed write or an
/// unreadable entry logs a warning and behaves like an empty slot, because
/// losing a cached search must never break the booking flow itself.
pub struct SessionCache {
    store: Arc<dyn StoragePort>,
}

impl SessionCache {
    pub fn new(store: Arc<dyn StoragePort>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    // ========================================================================
    // Slot Accessors
    // ========================================================================

    pub async fn set_search_params(&self, params: &SearchParams) {
        self.write_slot(KEY_SEARCH_PARAMS, params).await;
    }

    pub async fn search_params(&self) -> Option<Stored<SearchParams>> {
        self.read_slot(KEY_SEARCH_PARAMS).await
    }

    pub async fn clear_search_params(&self) {
        self.clear_slot(KEY_SEARCH_PARAMS).await;
    }

    pub async fn set_travel_data(&self, requirements: &TravellerRequirements) {
        self.write_slot(KEY_TRAVEL_DATA, requirements).await;
    }

    pub async fn travel_data(&self) -> Option<Stored<TravellerRequirements>> {
        self.read_slot(KEY_TRAVEL_DATA).await
    }

    pub async fn clear_travel_data(&self) {
        self.clear_slot(KEY_TRAVEL_DATA).await;
    }

    pub async fn set_passenger_data(&self, form: &BookingForm) {
        self.write_slot(KEY_PASSENGER_DATA, form).await;
    }

    pub async fn passenger_data(&self) -> Option<Stored<BookingForm>> {
        self.read_slot(KEY_PASSENGER_DATA).await
    }

    pub async fn clear_passenger_data(&self) {
        self.clear_slot(KEY_PASSENGER_DATA).await;
    }

    pub async fn set_pricing_data(&self, snapshot: &PricingSnapshot) {
        self.write_slot(KEY_PRICING_DATA, snapshot).await;
    }

    pub async fn pricing_data(&self) -> Option<Stored<PricingSnapshot>> {
        self.read_slot(KEY_PRICING_DATA).await
    }

    /// The cached pricing snapshot, but only while it is recent enough to
    /// submit against. Stale fares must be re-priced, not reused.
    pub async fn fresh_pricing(&self, max_age: Duration) -> Option<PricingSnapshot> {
        self.pricing_data()
            .await
            .filter(|stored| stored.is_fresh(max_age))
            .map(|stored| stored.payload)
    }

    pub async fn clear_pricing_data(&self) {
        self.clear_slot(KEY_PRICING_DATA).await;
    }

    pub async fn set_booking_data(&self, record: &BookingRecord) {
        self.write_slot(KEY_BOOKING_DATA, record).await;
    }

    pub async fn booking_data(&self) -> Option<Stored<BookingRecord>> {
        self.read_slot(KEY_BOOKING_DATA).await
    }

    pub async fn clear_booking_data(&self) {
        self.clear_slot(KEY_BOOKING_DATA).await;
    }

    pub async fn set_flight_details(&self, details: &BookingDetails) {
        self.write_slot(KEY_FLIGHT_DETAILS, details).await;
    }

    pub async fn flight_details(&self) -> Option<Stored<BookingDetails>> {
        self.read_slot(KEY_FLIGHT_DETAILS).await
    }

    pub async fn clear_flight_details(&self) {
        self.clear_slot(KEY_FLIGHT_DETAILS).await;
    }

    /// Wipes the whole session, e.g. when a new journey starts.
    pub async fn clear_all(&self) {
        for key in [
            KEY_SEARCH_PARAMS,
            KEY_TRAVEL_DATA,
            KEY_PASSENGER_DATA,
            KEY_PRICING_DATA,
            KEY_BOOKING_DATA,
            KEY_FLIGHT_DETAILS,
        ] {
            self.clear_slot(key).await;
        }
    }

    // ========================================================================
    // Generic Slot Plumbing
    // ========================================================================

    async fn write_slot<T: Serialize>(&self, key: &str, payload: &T) {
        let entry = Stored {
            payload,
            timestamp: Utc::now(),
        };
        let json = match serde_json::to_string(&entry) {
            Ok(json) => json,
            Err(error) => {
                warn!(key, %error, "session entry could not be serialized, skipping write");
                return;
            }
        };
        if let Err(error) = self.store.set(key, json).await {
            warn!(key, %error, "session write failed, continuing without cache");
        }
    }

    async fn read_slot<T: DeserializeOwned>(&self, key: &str) -> Option<Stored<T>> {
        let raw = match self.store.get(key).await {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(key, %error, "session read failed, treating slot as empty");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(error) => {
                warn!(key, %error, "session entry is malformed, treating slot as empty");
                None
            }
        }
    }

    async fn clear_slot(&self, key: &str) {
        if let Err(error) = self.store.remove(key).await {
            warn!(key, %error, "session clear failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use async_trait::async_trait;
    use flymoon_core::payload::build_payload;
    use serde_json::Value;

    struct FailingStore;

    #[async_trait]
    impl StoragePort for FailingStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("down".into()))
        }
        async fn set(&self, _key: &str, _value: String) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("down".into()))
        }
        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("down".into()))
        }
    }

    fn params() -> SearchParams {
        SearchParams {
            origin: "RUH".into(),
            destination: "JED".into(),
            outbound_date: "2026-03-15".into(),
            adults: 2,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn slot_round_trips_payload_unchanged() {
        let cache = SessionCache::in_memory();
        let params = params();
        cache.set_search_params(&params).await;
        let stored = cache.search_params().await.unwrap();
        assert_eq!(stored.payload, params);
    }

    #[tokio::test]
    async fn stored_json_is_payload_fields_plus_timestamp() {
        let store = Arc::new(MemoryStore::new());
        let cache = SessionCache::new(store.clone());
        cache.set_search_params(&params()).await;

        let raw = store.get("search_params").await.unwrap().unwrap();
        let json: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["origin"], "RUH");
        assert_eq!(json["adults"], 2);
        assert!(json["timestamp"].is_string(), "timestamp key added flat");
    }

    #[tokio::test]
    async fn empty_slot_reads_as_none() {
        let cache = SessionCache::in_memory();
        assert!(cache.search_params().await.is_none());
        assert!(cache.booking_data().await.is_none());
    }

    #[tokio::test]
    async fn malformed_entry_reads_as_none() {
        let store = Arc::new(MemoryStore::new());
        let cache = SessionCache::new(store.clone());
        store
            .set(KEY_PRICING_DATA, "{not json".into())
            .await
            .unwrap();
        assert!(cache.pricing_data().await.is_none());
    }

    #[tokio::test]
    async fn clearing_is_idempotent() {
        let cache = SessionCache::in_memory();
        cache.set_passenger_data(&BookingForm::default()).await;
        cache.clear_passenger_data().await;
        cache.clear_passenger_data().await;
        assert!(cache.passenger_data().await.is_none());
    }

    #[tokio::test]
    async fn slots_are_independent() {
        let cache = SessionCache::in_memory();
        cache.set_search_params(&params()).await;
        cache.set_passenger_data(&BookingForm::default()).await;
        cache.clear_search_params().await;
        assert!(cache.search_params().await.is_none());
        assert!(cache.passenger_data().await.is_some());
    }

    #[tokio::test]
    async fn unavailable_backend_degrades_to_empty_slots() {
        let cache = SessionCache::new(Arc::new(FailingStore));
        cache.set_search_params(&params()).await;
        assert!(cache.search_params().await.is_none());
        cache.clear_all().await;
    }

    #[tokio::test]
    async fn fresh_pricing_respects_the_age_window() {
        let store = Arc::new(MemoryStore::new());
        let cache = SessionCache::new(store.clone());
        let snapshot =
            PricingSnapshot::from_response("TUI-1", serde_json::json!({"NetAmount": 100.0}));
        cache.set_pricing_data(&snapshot).await;

        assert!(cache.fresh_pricing(Duration::seconds(900)).await.is_some());

        // Rewrite the entry with an old timestamp.
        let raw = store.get(KEY_PRICING_DATA).await.unwrap().unwrap();
        let mut json: Value = serde_json::from_str(&raw).unwrap();
        json["timestamp"] = Value::String("2020-01-01T00:00:00Z".into());
        store
            .set(KEY_PRICING_DATA, json.to_string())
            .await
            .unwrap();
        assert!(cache.fresh_pricing(Duration::seconds(900)).await.is_none());
        assert!(
            cache.pricing_data().await.is_some(),
            "stale entry still readable directly"
        );
    }

    #[tokio::test]
    async fn booking_record_slot_round_trips() {
        let cache = SessionCache::in_memory();
        let record = BookingRecord::failed(
            build_payload("TUI-2", &BookingForm::default(), vec![], 750.0),
            "Fare expired".into(),
        );
        cache.set_booking_data(&record).await;
        let stored = cache.booking_data().await.unwrap();
        assert_eq!(stored.payload, record);
    }

    #[tokio::test]
    async fn clear_all_empties_every_slot() {
        let cache = SessionCache::in_memory();
        cache.set_search_params(&params()).await;
        cache.set_passenger_data(&BookingForm::default()).await;
        cache
            .set_travel_data(&TravellerRequirements::default())
            .await;
        cache.clear_all().await;
        assert!(cache.search_params().await.is_none());
        assert!(cache.passenger_data().await.is_none());
        assert!(cache.travel_data().await.is_none());
    }
}
