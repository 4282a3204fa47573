use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Checklist codes the supplier uses in `GetCheckList` responses.
pub mod codes {
    pub const DATE_OF_BIRTH: &str = "DOB";
    pub const NATIONALITY: &str = "Nationality";
    pub const PASSPORT_NUMBER: &str = "PassportNo";
    pub const PASSPORT_EXPIRY: &str = "PDOE";
    pub const PASSPORT_ISSUE_PLACE: &str = "PLI";
    pub const VISA_TYPE: &str = "VisaType";
}

/// Which traveller document fields this itinerary requires. Domestic hops
/// typically require nothing; international ones flip passport and visa
/// fields on. Built from the supplier checklist; unknown codes are ignored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TravellerRequirements {
    pub date_of_birth: bool,
    pub nationality: bool,
    pub passport_number: bool,
    pub passport_expiry: bool,
    pub passport_issue_place: bool,
    pub visa_type: bool,
}

impl TravellerRequirements {
    /// Reads a raw `GetCheckList` response. Tolerates a missing or
    /// malformed list by requiring nothing.
    pub fn from_response(response: &Value) -> Self {
        let mut requirements = Self::default();
        let Some(items) = response["Checklist"].as_array() else {
            tracing::debug!("checklist response has no Checklist array, requiring nothing");
            return requirements;
        };
        for item in items {
            let mandatory = item["Mandatory"].as_bool().unwrap_or(false);
            let Some(code) = item["Code"].as_str() else {
                tracing::debug!("skipping checklist row without a string Code: {}", item);
                continue;
            };
            match code {
                codes::DATE_OF_BIRTH => requirements.date_of_birth = mandatory,
                codes::NATIONALITY => requirements.nationality = mandatory,
                codes::PASSPORT_NUMBER => requirements.passport_number = mandatory,
                codes::PASSPORT_EXPIRY => requirements.passport_expiry = mandatory,
                codes::PASSPORT_ISSUE_PLACE => requirements.passport_issue_place = mandatory,
                codes::VISA_TYPE => requirements.visa_type = mandatory,
                _ => {}
            }
        }
        requirements
    }

    /// True when at least one document field is required.
    pub fn any_required(&self) -> bool {
        self.date_of_birth
            || self.nationality
            || self.passport_number
            || self.passport_expiry
            || self.passport_issue_place
            || self.visa_type
    }
}
