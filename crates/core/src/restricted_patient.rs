//! Restricted-patient data: people discharged to an external hospital who remain on the
//! custodial record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Restricted-patient details as supplied by the restricted-patients service.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RestrictedPatient {
    pub supporting_prison_id: Option<String>,
    pub discharged_hospital: Option<Agency>,
    pub discharge_date: Option<NaiveDate>,
    pub discharge_details: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Agency {
    pub agency_id: String,
    pub description: Option<String>,
}

impl RestrictedPatient {
    pub fn hospital_id(&self) -> Option<String> {
        self.discharged_hospital
            .as_ref()
            .map(|hospital| hospital.agency_id.clone())
    }

    pub fn hospital_description(&self) -> Option<&str> {
        self.discharged_hospital
            .as_ref()
            .and_then(|hospital| hospital.description.as_deref())
    }
}

/// Location text for the document.
///
/// For a restricted patient with a known hospital the discharge is appended to the source
/// location (`"Outside - released from Moorland - discharged to Rampton"`); otherwise the
/// source text is used unchanged.
pub fn location_description(
    source: Option<&str>,
    restricted_patient: Option<&RestrictedPatient>,
) -> Option<String> {
    let hospital = restricted_patient.and_then(RestrictedPatient::hospital_description);
    match (source, hospital) {
        (Some(location), Some(hospital)) => Some(format!("{location} - discharged to {hospital}")),
        (None, Some(hospital)) => Some(format!("discharged to {hospital}")),
        (location, None) => location.map(str::to_string),
    }
}
