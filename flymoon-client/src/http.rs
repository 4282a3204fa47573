use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use flymoon_core::api::{BookingApi, UpstreamFailure};
use flymoon_core::payload::BookingPayload;
use flymoon_core::search::ExpressSearchRequest;
use flymoon_store::app_config::UpstreamConfig;

const USER_AGENT: &str = concat!("flymoon-web/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub client_id: Option<String>,
    pub timeout: Option<Duration>,
}

impl From<&UpstreamConfig> for ClientConfig {
    fn from(config: &UpstreamConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            client_id: config.client_id.clone(),
            timeout: config.timeout_seconds.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to initialise HTTP client: {0}")]
    Init(String),
}

/// HTTP implementation of [`BookingApi`] against the supplier's JSON API.
/// All failure modes are normalized into [`UpstreamFailure`] here; nothing
/// above this type ever sees a raw `reqwest` error.
pub struct HttpBookingApi {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
}

impl HttpBookingApi {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ClientError::Init(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            client_id: config.client_id.unwrap_or_default(),
        })
    }

    /// Every supplier call funnels through here so the error normalization
    /// happens exactly once.
    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Value, UpstreamFailure> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "calling booking supplier");
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(UpstreamFailure::transport)?;
        let status = response.status();
        if status.is_success() {
            response
                .json::<Value>()
                .await
                .map_err(UpstreamFailure::transport)
        } else {
            let body = response.json::<Value>().await.unwrap_or(Value::Null);
            let failure = UpstreamFailure::upstream(status.as_u16(), &body);
            warn!(%url, status = status.as_u16(), message = %failure.message, "supplier call failed");
            Err(failure)
        }
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn express_search(
        &self,
        request: &ExpressSearchRequest,
    ) -> Result<Value, UpstreamFailure> {
        self.post_json("flights/ExpressSearch", request).await
    }

    async fn price_check(&self, reference: &str) -> Result<Value, UpstreamFailure> {
        self.post_json("flights/SmartPricer", &json!({ "TUI": reference }))
            .await
    }

    async fn travel_checklist(&self, tui: &str) -> Result<Value, UpstreamFailure> {
        self.post_json("flights/GetCheckList", &json!({ "TUI": tui }))
            .await
    }

    async fn create_booking(&self, payload: &BookingPayload) -> Result<Value, UpstreamFailure> {
        self.post_json("flights/CreateBooking", payload).await
    }

    async fn web_settings(&self) -> Result<Value, UpstreamFailure> {
        self.post_json("utils/GetWebSettings", &json!({ "ClientID": self.client_id }))
            .await
    }
}
