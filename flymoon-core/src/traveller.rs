use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::checklist::TravellerRequirements;
use crate::form::{BookingForm, TravellerForm};

/// Date format used for DOB and passport expiry on the supplier wire.
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// One traveller as the supplier expects it inside `CreateBooking`.
/// Document fields are always present; fields the itinerary does not
/// require are sent as empty strings, never omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Traveller {
    #[serde(rename = "ID")]
    pub id: u32,
    pub title: String,
    pub f_name: String,
    pub l_name: String,
    pub age: u32,
    #[serde(rename = "DOB")]
    pub dob: String,
    pub gender: String,
    #[serde(rename = "PTC")]
    pub ptc: String,
    pub nationality: String,
    pub passport_no: String,
    #[serde(rename = "PDOE")]
    pub pdoe: String,
    #[serde(rename = "PLI")]
    pub pli: String,
    pub visa_type: String,
}

/// Maps the booking form's traveller rows into supplier travellers.
///
/// IDs are assigned 1-based in form order. A document field is copied only
/// when the checklist requires it; otherwise it is left empty even if the
/// form happened to capture a value. Age is derived from the populated DOB
/// against the travel date.
pub fn build_travellers(
    form: &BookingForm,
    requirements: &TravellerRequirements,
    travel_date: NaiveDate,
) -> Vec<Traveller> {
    form.travellers
        .iter()
        .enumerate()
        .map(|(index, row)| build_traveller(index as u32 + 1, row, requirements, travel_date))
        .collect()
}

fn build_traveller(
    id: u32,
    row: &TravellerForm,
    requirements: &TravellerRequirements,
    travel_date: NaiveDate,
) -> Traveller {
    let dob = required_field(requirements.date_of_birth, &row.date_of_birth);
    Traveller {
        id,
        title: row.title.clone(),
        f_name: row.first_name.clone(),
        l_name: row.last_name.clone(),
        age: age_on(&dob, travel_date),
        dob,
        gender: gender_from_title(&row.title),
        ptc: row.category.ptc_code().to_owned(),
        nationality: required_field(requirements.nationality, &row.nationality),
        passport_no: required_field(requirements.passport_number, &row.passport_no),
        pdoe: required_field(requirements.passport_expiry, &row.passport_expiry),
        pli: required_field(requirements.passport_issue_place, &row.passport_issue_place),
        visa_type: required_field(requirements.visa_type, &row.visa_type),
    }
}

fn required_field(required: bool, value: &Option<String>) -> String {
    if required {
        value.clone().unwrap_or_default()
    } else {
        String::new()
    }
}

/// Completed years between date of birth and travel date. An absent or
/// unparseable DOB yields 0, matching a domestic itinerary where the
/// supplier ignores the field.
fn age_on(dob: &str, travel_date: NaiveDate) -> u32 {
    NaiveDate::parse_from_str(dob, WIRE_DATE_FORMAT)
        .ok()
        .and_then(|born| travel_date.years_since(born))
        .unwrap_or(0)
}

fn gender_from_title(title: &str) -> String {
    let masculine =
        title.eq_ignore_ascii_case("mr") || title.eq_ignore_ascii_case("mstr");
    let code = if masculine { "M" } else { "F" };
    code.to_owned()
}
