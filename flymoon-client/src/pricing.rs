use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use flymoon_core::api::{BookingApi, UpstreamFailure};
use flymoon_core::record::PricingSnapshot;
use flymoon_store::session::SessionCache;

#[derive(Debug, Clone)]
pub enum PriceState {
    Idle,
    InFlight,
    Priced(PricingSnapshot),
    Failed(String),
}

/// Re-prices a held itinerary and keeps the session's pricing slot current.
/// The snapshot it produces is what a later submission reads its TUI and
/// net amount from.
pub struct PriceCheck {
    api: Arc<dyn BookingApi>,
    cache: Option<Arc<SessionCache>>,
    state_tx: watch::Sender<PriceState>,
    state_rx: watch::Receiver<PriceState>,
}

impl PriceCheck {
    pub fn new(api: Arc<dyn BookingApi>, cache: Option<Arc<SessionCache>>) -> Self {
        let (state_tx, state_rx) = watch::channel(PriceState::Idle);
        Self {
            api,
            cache,
            state_tx,
            state_rx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PriceState> {
        self.state_rx.clone()
    }

    pub fn current(&self) -> PriceState {
        self.state_rx.borrow().clone()
    }

    pub async fn check(&self, tui: &str) -> Result<PricingSnapshot, UpstreamFailure> {
        self.state_tx.send_replace(PriceState::InFlight);
        match self.api.price_check(tui).await {
            Ok(raw) => {
                let snapshot = PricingSnapshot::from_response(tui, raw);
                if let Some(cache) = &self.cache {
                    cache.set_pricing_data(&snapshot).await;
                }
                self.state_tx
                    .send_replace(PriceState::Priced(snapshot.clone()));
                Ok(snapshot)
            }
            Err(failure) => {
                warn!(tui, error = %failure, "price check failed");
                self.state_tx
                    .send_replace(PriceState::Failed(failure.message.clone()));
                Err(failure)
            }
        }
    }
}
