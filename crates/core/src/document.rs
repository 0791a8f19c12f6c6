//! The prisoner document: the search-optimised shape a booking record is translated into.
//!
//! Field names serialise in camelCase to match the search index mapping. Optional scalars
//! and empty lists are omitted from the JSON so that a document only carries what is known.

use crate::{IndexerError, IndexerResult};
use chrono::{NaiveDate, NaiveDateTime};
use indexer_types::PrisonerNumber;
use serde::{Deserialize, Serialize};

// ============================================================================
// Document
// ============================================================================

/// A normalised, search-ready prisoner document.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrisonerDocument {
    pub prisoner_number: PrisonerNumber,
    pub booking_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pnc_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pnc_number_canonical_short: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pnc_number_canonical_long: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cro_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prison_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prison_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_out_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_movement_type_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_movement_reason_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csra: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_names: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<PrisonerAlias>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<PrisonerAlert>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_centimetres: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kilograms: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_colour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_eye_colour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_eye_colour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facial_hair: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_of_face: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoe_size: Option<i32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tattoos: Vec<BodyPartDetail>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scars: Vec<BodyPartDetail>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<BodyPartDetail>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other_marks: Vec<BodyPartDetail>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub religion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,
    #[serde(default)]
    pub youth_offender: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence_start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence_expiry_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licence_expiry_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_detention_curfew_eligibility_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_detention_curfew_actual_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_detention_curfew_end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topup_supervision_start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topup_supervision_expiry_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_days_awarded: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_dto_release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_dto_release_date_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tariff_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reception_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parole_eligibility_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automatic_release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_recall_release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_parole_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_serious_offence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recall: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imprisonment_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imprisonment_status_description: Option<String>,
    #[serde(default)]
    pub indeterminate_sentence: bool,

    #[serde(default)]
    pub restricted_patient: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supporting_prison_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discharged_hospital_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discharged_hospital_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discharge_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discharge_details: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_incentive: Option<CurrentIncentive>,
}

impl PrisonerDocument {
    /// Parse a previously indexed document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::Deserialization`] if the JSON does not describe a document.
    pub fn parse(json_text: &str) -> IndexerResult<Self> {
        serde_json::from_str(json_text).map_err(IndexerError::Deserialization)
    }

    /// Render the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::Serialization`] if serialisation fails.
    pub fn render(&self) -> IndexerResult<String> {
        serde_json::to_string_pretty(self).map_err(IndexerError::Serialization)
    }
}

// ============================================================================
// Nested document types
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrisonerAlias {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_names: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrisonerAlert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_code: Option<String>,
    pub active: bool,
    pub expired: bool,
}

/// Where on the body a tattoo, scar or mark is, with any free-text description.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BodyPartDetail {
    pub body_part: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Snapshot of the incentive level in force when the document was built.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentIncentive {
    pub level: IncentiveLevelSummary,
    /// Whole-second precision; the index does not keep anything finer.
    #[serde(with = "second_precision")]
    pub date_time: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_review_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct IncentiveLevelSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub description: String,
}

/// Serde adapter writing `yyyy-MM-dd'T'HH:mm:ss`.
///
/// Reading accepts a fractional part (older documents) and drops it.
mod second_precision {
    use chrono::{NaiveDateTime, SubsecRound};
    use serde::{Deserialize, Deserializer, Serializer};

    const WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
    const READ_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(WRITE_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, READ_FORMAT)
            .map(|dt| dt.trunc_subsecs(0))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    const STORED_DOCUMENT: &str = r#"{
        "prisonerNumber": "A1234AA",
        "bookingId": "1200",
        "firstName": "JOHN",
        "alerts": [ { "alertType": "X", "alertCode": "XA", "active": true, "expired": false } ],
        "currentIncentive": {
            "level": { "code": "STD", "description": "Standard" },
            "dateTime": "2022-11-10T15:47:24",
            "nextReviewDate": "2023-11-18"
        }
    }"#;

    #[test]
    fn parses_stored_document_with_missing_fields() {
        let doc = PrisonerDocument::parse(STORED_DOCUMENT).expect("parse document");
        assert_eq!(doc.prisoner_number.as_str(), "A1234AA");
        assert_eq!(doc.booking_id, "1200");
        assert!(doc.aliases.is_empty());
        assert!(!doc.youth_offender);
        assert!(!doc.restricted_patient);

        let incentive = doc.current_incentive.expect("incentive");
        assert_eq!(incentive.level.code.as_deref(), Some("STD"));
        assert_eq!(incentive.date_time.to_string(), "2022-11-10 15:47:24");
    }

    #[test]
    fn incentive_date_time_is_written_without_fraction() {
        let doc = PrisonerDocument::parse(STORED_DOCUMENT).expect("parse document");
        let json = doc.render().expect("render document");
        assert!(json.contains(r#""dateTime": "2022-11-10T15:47:24""#));
        assert!(!json.contains("middleNames"));
        assert!(!json.contains("tattoos"));
    }

    #[test]
    fn fractional_date_time_in_old_documents_is_dropped_on_read() {
        let input = r#"{
            "level": { "description": "Basic" },
            "dateTime": "2021-03-01T08:15:00.123456"
        }"#;

        let incentive: CurrentIncentive = serde_json::from_str(input).expect("parse incentive");
        assert_eq!(incentive.date_time.nanosecond(), 0);
        assert!(incentive.level.code.is_none());
    }

    #[test]
    fn round_trip_is_stable() {
        let doc = PrisonerDocument::parse(STORED_DOCUMENT).expect("parse document");
        let rendered = doc.render().expect("render document");
        let reparsed = PrisonerDocument::parse(&rendered).expect("reparse document");
        assert_eq!(doc, reparsed);
        assert_eq!(rendered, reparsed.render().expect("render again"));
    }

    #[test]
    fn rejects_document_without_prisoner_number() {
        let err = PrisonerDocument::parse(r#"{ "bookingId": "1" }"#)
            .expect_err("should reject document");
        assert!(matches!(err, IndexerError::Deserialization(_)));
    }
}
