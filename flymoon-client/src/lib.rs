pub mod checklist;
pub mod http;
pub mod pricing;
pub mod settings;
pub mod submit;

#[cfg(test)]
mod testing;

pub use http::{ClientConfig, ClientError, HttpBookingApi};
pub use pricing::{PriceCheck, PriceState};
pub use settings::WebSettings;
pub use submit::{BookingSubmission, SubmitHandle, SubmitOutcome, SubmitRequest, SubmitState};
