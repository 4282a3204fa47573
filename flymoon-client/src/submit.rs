use std::sync::Arc;

use chrono::NaiveDate;
use futures_util::future::{abortable, AbortHandle};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use flymoon_core::api::BookingApi;
use flymoon_core::checklist::TravellerRequirements;
use flymoon_core::extract::{extract_booking_details, BookingDetails};
use flymoon_core::form::BookingForm;
use flymoon_core::payload::build_payload;
use flymoon_core::record::BookingRecord;
use flymoon_core::traveller::build_travellers;
use flymoon_store::session::SessionCache;

/// Everything a submission needs: the priced itinerary's TUI and amount,
/// the completed form, and the document requirements that shaped it.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub tui: String,
    pub net_amount: f64,
    pub form: BookingForm,
    pub requirements: TravellerRequirements,
    /// Outbound travel date; ages are computed against this day.
    pub travel_date: NaiveDate,
}

#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Created {
        record: BookingRecord,
        details: BookingDetails,
    },
    Failed {
        message: String,
    },
}

/// Observable lifecycle of one submission. Exactly one transition path:
/// `Idle -> InFlight -> Settled`, except that an aborted attempt falls back
/// to `Idle` without ever settling.
#[derive(Debug, Clone)]
pub enum SubmitState {
    Idle,
    InFlight,
    Settled(SubmitOutcome),
}

impl SubmitState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmitState::InFlight)
    }
}

/// Drives a booking through transform, payload assembly, the supplier call,
/// and session persistence. UI code watches [`SubmitState`] instead of
/// touching the call directly.
pub struct BookingSubmission {
    api: Arc<dyn BookingApi>,
    cache: Option<Arc<SessionCache>>,
    state_tx: watch::Sender<SubmitState>,
    state_rx: watch::Receiver<SubmitState>,
}

impl BookingSubmission {
    pub fn new(api: Arc<dyn BookingApi>, cache: Option<Arc<SessionCache>>) -> Self {
        let (state_tx, state_rx) = watch::channel(SubmitState::Idle);
        Self {
            api,
            cache,
            state_tx,
            state_rx,
        }
    }

    /// A receiver that sees every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SubmitState> {
        self.state_rx.clone()
    }

    pub fn current(&self) -> SubmitState {
        self.state_rx.borrow().clone()
    }

    /// Runs one submission to completion.
    ///
    /// The traveller transform and payload assembly happen before the wire
    /// call, so a payload bug fails fast without hitting the supplier. The
    /// outcome, success or failure, is recorded to the session before the
    /// state settles; readers that wake on `Settled` see the cache written.
    pub async fn submit(&self, request: SubmitRequest) -> SubmitOutcome {
        let correlation_id = Uuid::new_v4();
        self.state_tx.send_replace(SubmitState::InFlight);

        // 1. Transform form rows into supplier travellers.
        let travellers =
            build_travellers(&request.form, &request.requirements, request.travel_date);

        // 2. Assemble the full payload with agency fallbacks.
        let payload = build_payload(
            &request.tui,
            &request.form,
            travellers,
            request.net_amount,
        );
        info!(%correlation_id, tui = %request.tui, travellers = payload.travellers.len(), "submitting booking");

        // 3. One wire call; every failure arrives here already normalized.
        let outcome = match self.api.create_booking(&payload).await {
            Ok(response) => {
                // 4a. Project confirmation data and persist both records.
                let details = extract_booking_details(&response);
                let record = BookingRecord::created(payload, response);
                if let Some(cache) = &self.cache {
                    cache.set_booking_data(&record).await;
                    cache.set_flight_details(&details).await;
                }
                info!(%correlation_id, on_hold = details.on_hold, "booking created");
                SubmitOutcome::Created { record, details }
            }
            Err(failure) => {
                // 4b. Persist the failure so the error page can explain it.
                let message = failure.message.clone();
                let record = BookingRecord::failed(payload, message.clone());
                if let Some(cache) = &self.cache {
                    cache.set_booking_data(&record).await;
                }
                warn!(%correlation_id, error = %message, "booking submission failed");
                SubmitOutcome::Failed { message }
            }
        };

        self.state_tx.send_replace(SubmitState::Settled(outcome.clone()));
        outcome
    }

    /// Runs the submission on its own task and hands back an abort handle.
    /// Aborting an in-flight attempt drops the step in progress, prevents
    /// any further state or cache writes, and returns the state to `Idle`;
    /// a settled attempt is unaffected.
    pub fn spawn(self: Arc<Self>, request: SubmitRequest) -> SubmitHandle {
        let runner = Arc::clone(&self);
        let (work, abort_handle) = abortable(async move {
            runner.submit(request).await;
        });
        let task = tokio::spawn(async move {
            if work.await.is_err() {
                self.state_tx.send_replace(SubmitState::Idle);
                info!("booking submission aborted before settling");
            }
        });
        SubmitHandle { abort_handle, task }
    }
}

/// Owned by whatever drives the submission; dropping it detaches the task
/// but does not cancel it. Call [`SubmitHandle::abort`] to cancel.
pub struct SubmitHandle {
    abort_handle: AbortHandle,
    task: JoinHandle<()>,
}

impl SubmitHandle {
    pub fn abort(&self) {
        self.abort_handle.abort();
    }

    /// Waits until the task is done, settled or aborted.
    pub async fn finished(self) {
        let _ = self.task.await;
    }
}
