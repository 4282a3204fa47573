use serde::{Deserialize, Serialize};

/// Passenger type code sent to the supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaxCategory {
    #[default]
    Adult,
    Child,
    Infant,
}

impl PaxCategory {
    pub fn ptc_code(&self) -> &'static str {
        match self {
            PaxCategory::Adult => "ADT",
            PaxCategory::Child => "CHD",
            PaxCategory::Infant => "INF",
        }
    }
}

/// One traveller as captured by the booking form. Document fields are
/// optional because the form only renders the inputs the itinerary's
/// checklist marked as required.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TravellerForm {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub category: PaxCategory,
    pub date_of_birth: Option<String>,
    pub nationality: Option<String>,
    pub passport_no: Option<String>,
    pub passport_expiry: Option<String>,
    pub passport_issue_place: Option<String>,
    pub visa_type: Option<String>,
}

/// The whole booking form: lead contact details plus one row per traveller.
/// Contact fields left blank by the user stay `None` here; agency fallbacks
/// are applied later when the supplier payload is built.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingForm {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub country_code: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub pin: Option<String>,
    pub travellers: Vec<TravellerForm>,
}
