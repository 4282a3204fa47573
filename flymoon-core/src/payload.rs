use serde::{Deserialize, Serialize};

use crate::form::BookingForm;
use crate::traveller::Traveller;

/// Agency contact details substituted for anything the customer left blank.
/// The supplier rejects bookings with missing contact fields, so every slot
/// must carry a value.
pub mod fallback {
    pub const MOBILE: &str = "0500000000";
    pub const EMAIL: &str = "support@flymoon.sa";
    pub const ADDRESS: &str = "Flymoon Travel, King Fahd Road";
    pub const COUNTRY_CODE: &str = "SA";
    pub const STATE: &str = "Riyadh";
    pub const CITY: &str = "Riyadh";
    pub const PIN: &str = "11564";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ContactInfo {
    pub title: String,
    pub f_name: String,
    pub l_name: String,
    pub mobile: String,
    pub email: String,
    pub address: String,
    pub country_code: String,
    pub state: String,
    pub city: String,
    #[serde(rename = "PIN")]
    pub pin: String,
}

impl ContactInfo {
    /// Lead contact from the form, with agency fallbacks for blanks.
    pub fn from_form(form: &BookingForm) -> Self {
        Self {
            title: form.title.clone(),
            f_name: form.first_name.clone(),
            l_name: form.last_name.clone(),
            mobile: or_fallback(&form.mobile, fallback::MOBILE),
            email: or_fallback(&form.email, fallback::EMAIL),
            address: or_fallback(&form.address, fallback::ADDRESS),
            country_code: or_fallback(&form.country_code, fallback::COUNTRY_CODE),
            state: or_fallback(&form.state, fallback::STATE),
            city: or_fallback(&form.city, fallback::CITY),
            pin: or_fallback(&form.pin, fallback::PIN),
        }
    }

    /// Destination-side contact. The agency acts as the local contact, so
    /// this is entirely fallback data.
    pub fn destination_default() -> Self {
        Self {
            title: String::new(),
            f_name: String::new(),
            l_name: String::new(),
            mobile: fallback::MOBILE.to_owned(),
            email: fallback::EMAIL.to_owned(),
            address: fallback::ADDRESS.to_owned(),
            country_code: fallback::COUNTRY_CODE.to_owned(),
            state: fallback::STATE.to_owned(),
            city: fallback::CITY.to_owned(),
            pin: fallback::PIN.to_owned(),
        }
    }
}

fn or_fallback(value: &Option<String>, fallback: &str) -> String {
    match value {
        Some(text) if !text.is_empty() => text.clone(),
        _ => fallback.to_owned(),
    }
}

/// The `CreateBooking` request body. Field names and nesting follow the
/// supplier contract exactly; `PLP` is always present and always empty for
/// this sales channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct BookingPayload {
    #[serde(rename = "TUI")]
    pub tui: String,
    pub net_amount: f64,
    pub contact_info: ContactInfo,
    pub destination_contact_info: ContactInfo,
    pub travellers: Vec<Traveller>,
    #[serde(rename = "PLP")]
    pub plp: String,
}

/// Assembles the complete booking request from the priced itinerary's TUI,
/// the submitted form, and the already-transformed travellers.
///
/// `net_amount` is trusted to be the figure confirmed by the latest price
/// check for this TUI; nothing here re-verifies it.
pub fn build_payload(
    tui: &str,
    form: &BookingForm,
    travellers: Vec<Traveller>,
    net_amount: f64,
) -> BookingPayload {
    BookingPayload {
        tui: tui.to_owned(),
        net_amount,
        contact_info: ContactInfo::from_form(form),
        destination_contact_info: ContactInfo::destination_default(),
        travellers,
        plp: String::new(),
    }
}
