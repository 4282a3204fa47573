use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use flymoon_core::api::{BookingApi, UpstreamFailure};
use flymoon_core::payload::BookingPayload;
use flymoon_core::search::ExpressSearchRequest;

pub enum Script {
    Ok(Value),
    Fail(UpstreamFailure),
    /// Never resolves; for exercising abort paths.
    Hang,
}

/// Test double that answers every supplier call with one scripted response
/// and counts how often it was hit.
pub struct ScriptedApi {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedApi {
    pub fn ok(value: Value) -> Arc<Self> {
        Arc::new(Self {
            script: Script::Ok(value),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn fail(failure: UpstreamFailure) -> Arc<Self> {
        Arc::new(Self {
            script: Script::Fail(failure),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn hang() -> Arc<Self> {
        Arc::new(Self {
            script: Script::Hang,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn respond(&self) -> Result<Value, UpstreamFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Ok(value) => Ok(value.clone()),
            Script::Fail(failure) => Err(failure.clone()),
            Script::Hang => {
                futures_util::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

#[async_trait]
impl BookingApi for ScriptedApi {
    async fn express_search(&self, _request: &ExpressSearchRequest) -> Result<Value, UpstreamFailure> {
        self.respond().await
    }

    async fn price_check(&self, _reference: &str) -> Result<Value, UpstreamFailure> {
        self.respond().await
    }

    async fn travel_checklist(&self, _tui: &str) -> Result<Value, UpstreamFailure> {
        self.respond().await
    }

    async fn create_booking(&self, _payload: &BookingPayload) -> Result<Value, UpstreamFailure> {
        self.respond().await
    }

    async fn web_settings(&self) -> Result<Value, UpstreamFailure> {
        self.respond().await
    }
}
