//! Booking-record wire model and parser.
//!
//! A booking record describes one custodial episode for a person: identity, demographics,
//! current location, sentence calculation dates and a number of repeated sub-records.
//! Field names follow the upstream camelCase JSON.

use crate::{NomisError, NomisResult};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Booking record
// ============================================================================

/// A booking record as supplied by the source-of-record system.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub offender_no: Option<String>,
    pub booking_id: Option<i64>,
    pub booking_no: Option<String>,

    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,

    pub agency_id: Option<String>,
    pub assigned_living_unit: Option<AssignedLivingUnit>,
    pub location_description: Option<String>,
    pub status: Option<String>,
    pub in_out_status: Option<String>,
    pub last_movement_type_code: Option<String>,
    pub last_movement_reason_code: Option<String>,
    pub reception_date: Option<NaiveDate>,

    pub category_code: Option<String>,
    pub csra: Option<String>,
    pub legal_status: Option<String>,
    pub recall: Option<bool>,
    pub imprisonment_status: Option<String>,
    pub imprisonment_status_description: Option<String>,

    pub physical_attributes: Option<PhysicalAttributes>,
    pub sentence_detail: Option<SentenceDetail>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub identifiers: Vec<OffenderIdentifier>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub aliases: Vec<Alias>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alerts: Vec<Alert>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub physical_characteristics: Vec<PhysicalCharacteristic>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub physical_marks: Vec<PhysicalMark>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_information: Vec<ProfileInformation>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub offence_history: Vec<OffenceHistoryDetail>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sentence_terms: Vec<SentenceTerm>,
}

impl BookingRecord {
    /// Parse a booking record from JSON text.
    ///
    /// This uses `serde_path_to_error` to surface the path (e.g. `alerts[2].active`) of the
    /// field that failed to decode.
    ///
    /// # Errors
    ///
    /// Returns [`NomisError::Schema`] if any consumed field has an unexpected type, or if the
    /// text is not JSON at all.
    pub fn parse(json_text: &str) -> NomisResult<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);
        let record: BookingRecord = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|err| {
                let path = err.path().to_string();
                let path = if path.is_empty() || path == "." {
                    "<root>".to_string()
                } else {
                    path
                };
                NomisError::Schema {
                    path,
                    source: err.into_inner(),
                }
            })?;
        deserializer.end()?;
        Ok(record)
    }
}

// ============================================================================
// Nested sub-records
// ============================================================================

/// The cell or wing the person is currently assigned to.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignedLivingUnit {
    pub agency_id: Option<String>,
    pub location_id: Option<i64>,
    pub description: Option<String>,
    pub agency_name: Option<String>,
}

/// An identifier held for the person, keyed by type code (`PNC`, `CRO`, ...).
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OffenderIdentifier {
    #[serde(rename = "type")]
    pub type_code: Option<String>,
    pub value: Option<String>,
}

/// An alternative name recorded for the person.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Alias {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub ethnicity: Option<String>,
    pub name_type: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub alert_id: Option<i64>,
    pub alert_type: Option<String>,
    pub alert_code: Option<String>,
    pub date_created: Option<NaiveDate>,
    pub date_expires: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expired: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalAttributes {
    pub gender: Option<String>,
    pub ethnicity: Option<String>,
    pub height_centimetres: Option<i32>,
    pub weight_kilograms: Option<i32>,
}

/// A free-text physical characteristic keyed by type code (`HAIR`, `BUILD`, ...).
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalCharacteristic {
    #[serde(rename = "type")]
    pub type_code: Option<String>,
    pub characteristic: Option<String>,
    pub detail: Option<String>,
}

/// A tattoo, scar or other distinguishing mark.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalMark {
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub side: Option<String>,
    pub body_part: Option<String>,
    pub orientation: Option<String>,
    pub comment: Option<String>,
}

/// A profile question answer keyed by type code (`NAT`, `RELF`, `MARITAL`, `YOUTH`, ...).
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInformation {
    #[serde(rename = "type")]
    pub type_code: Option<String>,
    pub question: Option<String>,
    pub result_value: Option<String>,
}

/// Sentence calculation dates for the booking.
///
/// `*_override_date` fields are manually recorded and supersede the calculated date of the
/// same kind.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SentenceDetail {
    pub sentence_start_date: Option<NaiveDate>,
    pub confirmed_release_date: Option<NaiveDate>,
    pub release_date: Option<NaiveDate>,
    pub sentence_expiry_date: Option<NaiveDate>,
    pub licence_expiry_date: Option<NaiveDate>,
    pub home_detention_curfew_eligibility_date: Option<NaiveDate>,
    pub home_detention_curfew_actual_date: Option<NaiveDate>,
    pub home_detention_curfew_end_date: Option<NaiveDate>,
    pub topup_supervision_start_date: Option<NaiveDate>,
    pub topup_supervision_expiry_date: Option<NaiveDate>,
    pub additional_days_awarded: Option<i32>,
    pub non_dto_release_date: Option<NaiveDate>,
    pub non_dto_release_date_type: Option<String>,
    pub tariff_date: Option<NaiveDate>,
    pub parole_eligibility_date: Option<NaiveDate>,
    pub actual_parole_date: Option<NaiveDate>,
    pub automatic_release_date: Option<NaiveDate>,
    pub automatic_release_override_date: Option<NaiveDate>,
    pub post_recall_release_date: Option<NaiveDate>,
    pub post_recall_release_override_date: Option<NaiveDate>,
    pub conditional_release_date: Option<NaiveDate>,
    pub conditional_release_override_date: Option<NaiveDate>,
}

/// An offence charged against the person. The history spans every booking, so entries
/// must be matched against the current booking id before use.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OffenceHistoryDetail {
    pub booking_id: Option<i64>,
    pub offence_date: Option<NaiveDate>,
    pub offence_code: Option<String>,
    pub offence_description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub most_serious: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SentenceTerm {
    pub booking_id: Option<i64>,
    pub sentence_sequence: Option<i32>,
    pub term_sequence: Option<i32>,
    pub sentence_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub life_sentence: bool,
}

/// Decode `null` as `T::default()`, so a present-but-null collection or flag behaves the
/// same as a missing one.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
