use tracing::debug;

use flymoon_core::api::{BookingApi, UpstreamFailure};
use flymoon_core::checklist::TravellerRequirements;
use flymoon_store::session::SessionCache;

/// Fetches the itinerary's document checklist, projects it into
/// [`TravellerRequirements`], and caches it so the booking form renders the
/// right inputs on revisit.
pub async fn fetch_traveller_requirements(
    api: &dyn BookingApi,
    cache: Option<&SessionCache>,
    tui: &str,
) -> Result<TravellerRequirements, UpstreamFailure> {
    let raw = api.travel_checklist(tui).await?;
    let requirements = TravellerRequirements::from_response(&raw);
    debug!(tui, any_required = requirements.any_required(), "travel checklist loaded");
    if let Some(cache) = cache {
        cache.set_travel_data(&requirements).await;
    }
    Ok(requirements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedApi;
    use flymoon_core::api::UpstreamFailure;
    use flymoon_store::session::SessionCache;
    use serde_json::json;

    #[tokio::test]
    async fn requirements_are_projected_and_cached() {
        let api = ScriptedApi::ok(json!({
            "Checklist": [
                {"Code": "PassportNo", "Mandatory": true},
                {"Code": "DOB", "Mandatory": true}
            ]
        }));
        let cache = SessionCache::in_memory();

        let requirements = fetch_traveller_requirements(api.as_ref(), Some(&cache), "TUI-3")
            .await
            .unwrap();
        assert!(requirements.passport_number);
        assert!(requirements.date_of_birth);
        assert!(!requirements.visa_type);

        let stored = cache.travel_data().await.unwrap();
        assert_eq!(stored.payload, requirements);
    }

    #[tokio::test]
    async fn upstream_failure_propagates_without_caching() {
        let api = ScriptedApi::fail(UpstreamFailure::transport("connection refused"));
        let cache = SessionCache::in_memory();
        let result = fetch_traveller_requirements(api.as_ref(), Some(&cache), "TUI-3").await;
        assert!(result.is_err());
        assert!(cache.travel_data().await.is_none());
    }
}
