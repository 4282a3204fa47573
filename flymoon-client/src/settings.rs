use std::sync::Arc;

use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::debug;

use flymoon_core::api::{BookingApi, UpstreamFailure};

/// Site-wide settings from the supplier portal, fetched at most once per
/// process. A failed fetch is not memoized; the next call retries.
pub struct WebSettings {
    api: Arc<dyn BookingApi>,
    cell: OnceCell<Value>,
}

impl WebSettings {
    pub fn new(api: Arc<dyn BookingApi>) -> Self {
        Self {
            api,
            cell: OnceCell::new(),
        }
    }

    pub async fn get(&self) -> Result<&Value, UpstreamFailure> {
        self.cell
            .get_or_try_init(|| async {
                debug!("fetching web settings");
                self.api.web_settings().await
            })
            .await
    }
}
