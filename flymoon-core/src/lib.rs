pub mod api;
pub mod checklist;
pub mod extract;
pub mod form;
pub mod payload;
pub mod record;
pub mod search;
pub mod traveller;

pub use api::{failure_message, BookingApi, FailureKind, UpstreamFailure};
pub use checklist::TravellerRequirements;
pub use extract::{extract_booking_details, BookingDetails};
pub use form::{BookingForm, PaxCategory, TravellerForm};
pub use payload::{build_payload, BookingPayload, ContactInfo};
pub use record::{BookingRecord, BookingStatusTag, PricingSnapshot};
pub use search::{ExpressSearchRequest, SearchParams, SearchTrip};
pub use traveller::{build_travellers, Traveller};
