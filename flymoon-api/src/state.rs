use std::sync::Arc;

use flymoon_core::api::BookingApi;
use flymoon_store::app_config::SiteConfig;

#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn BookingApi>,
    pub site: SiteConfig,
}
