//! Scalar field mapping from a booking record to a prisoner document.
//!
//! Mapping is total: an absent nested structure yields absent fields, never an error. The
//! document returned here has empty list fields, no restricted-patient data and no
//! incentive; the translator fills those in.

use crate::constants::{
    CRO_IDENTIFIER, MARITAL_STATUS_PROFILE, NATIONALITY_PROFILE, PNC_IDENTIFIER,
    RELIGION_PROFILE, YOUTH_PROFILE,
};
use crate::document::PrisonerDocument;
use crate::identity::BookingIdentity;
use crate::pnc;
use indexer_types::BookingId;
use nomis::{BookingRecord, PhysicalCharacteristic};

// ============================================================================
// Physical characteristics dispatch
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Characteristic {
    HairColour,
    RightEyeColour,
    LeftEyeColour,
    FacialHair,
    ShapeOfFace,
    Build,
    ShoeSize,
}

/// Type codes consumed from physical characteristics. Unlisted codes are ignored.
const CHARACTERISTIC_CODES: [(&str, Characteristic); 7] = [
    ("HAIR", Characteristic::HairColour),
    ("R_EYE_C", Characteristic::RightEyeColour),
    ("L_EYE_C", Characteristic::LeftEyeColour),
    ("FACIAL_HAIR", Characteristic::FacialHair),
    ("FACE", Characteristic::ShapeOfFace),
    ("BUILD", Characteristic::Build),
    ("SHOESIZE", Characteristic::ShoeSize),
];

impl Characteristic {
    fn from_code(code: &str) -> Option<Self> {
        CHARACTERISTIC_CODES
            .iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|(_, characteristic)| *characteristic)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct PhysicalFeatures {
    hair_colour: Option<String>,
    right_eye_colour: Option<String>,
    left_eye_colour: Option<String>,
    facial_hair: Option<String>,
    shape_of_face: Option<String>,
    build: Option<String>,
    shoe_size: Option<i32>,
}

impl PhysicalFeatures {
    /// Fold characteristic entries in source order; a later entry of the same type replaces
    /// an earlier one. Blank details are skipped.
    fn from_entries(entries: &[PhysicalCharacteristic]) -> Self {
        entries
            .iter()
            .filter_map(|entry| {
                let characteristic = Characteristic::from_code(entry.type_code.as_deref()?)?;
                let detail = entry.detail.as_deref().filter(|d| !d.trim().is_empty())?;
                Some((characteristic, detail))
            })
            .fold(Self::default(), |features, (characteristic, detail)| {
                features.with(characteristic, detail)
            })
    }

    fn with(self, characteristic: Characteristic, detail: &str) -> Self {
        let text = Some(detail.to_string());
        match characteristic {
            Characteristic::HairColour => Self {
                hair_colour: text,
                ..self
            },
            Characteristic::RightEyeColour => Self {
                right_eye_colour: text,
                ..self
            },
            Characteristic::LeftEyeColour => Self {
                left_eye_colour: text,
                ..self
            },
            Characteristic::FacialHair => Self {
                facial_hair: text,
                ..self
            },
            Characteristic::ShapeOfFace => Self {
                shape_of_face: text,
                ..self
            },
            Characteristic::Build => Self {
                build: text,
                ..self
            },
            // Malformed sizes degrade to absent.
            Characteristic::ShoeSize => Self {
                shoe_size: detail.trim().parse().ok(),
                ..self
            },
        }
    }
}

// ============================================================================
// Lookups over repeated sub-records
// ============================================================================

/// Value of the first identifier with the given type code. Later duplicates are ignored.
fn first_identifier<'a>(record: &'a BookingRecord, type_code: &str) -> Option<&'a str> {
    record
        .identifiers
        .iter()
        .find(|identifier| identifier.type_code.as_deref() == Some(type_code))
        .and_then(|identifier| identifier.value.as_deref())
}

/// Answer of the first profile entry with the given type code.
fn first_profile_value<'a>(record: &'a BookingRecord, type_code: &str) -> Option<&'a str> {
    record
        .profile_information
        .iter()
        .find(|profile| profile.type_code.as_deref() == Some(type_code))
        .and_then(|profile| profile.result_value.as_deref())
}

fn is_youth_offender(record: &BookingRecord) -> bool {
    first_profile_value(record, YOUTH_PROFILE)
        .is_some_and(|value| value.eq_ignore_ascii_case("YES"))
}

/// The offence history spans every booking; only this booking's most serious offence counts.
fn most_serious_offence(record: &BookingRecord, booking_id: BookingId) -> Option<String> {
    record
        .offence_history
        .iter()
        .find(|offence| offence.most_serious && offence.booking_id == Some(booking_id.value()))
        .and_then(|offence| offence.offence_description.clone())
}

fn has_indeterminate_sentence(record: &BookingRecord, booking_id: BookingId) -> bool {
    record
        .sentence_terms
        .iter()
        .any(|term| term.life_sentence && term.booking_id == Some(booking_id.value()))
}

// ============================================================================
// Mapping
// ============================================================================

/// Map the scalar fields of a booking record.
pub fn map_fields(identity: &BookingIdentity, record: &BookingRecord) -> PrisonerDocument {
    let pnc_number = first_identifier(record, PNC_IDENTIFIER);
    let living_unit = record.assigned_living_unit.as_ref();
    let attributes = record.physical_attributes.as_ref();
    let sentence = record.sentence_detail.as_ref();
    let features = PhysicalFeatures::from_entries(&record.physical_characteristics);

    PrisonerDocument {
        prisoner_number: identity.prisoner_number.clone(),
        booking_id: identity.booking_id.to_string(),
        book_number: record.booking_no.clone(),

        pnc_number: pnc_number.map(str::to_string),
        pnc_number_canonical_short: pnc_number.and_then(pnc::canonical_short),
        pnc_number_canonical_long: pnc_number.and_then(pnc::canonical_long),
        cro_number: first_identifier(record, CRO_IDENTIFIER).map(str::to_string),

        cell_location: living_unit.and_then(|unit| unit.description.clone()),
        prison_name: living_unit.and_then(|unit| unit.agency_name.clone()),
        prison_id: record.agency_id.clone(),
        status: record.status.clone(),
        in_out_status: record.in_out_status.clone(),
        last_movement_type_code: record.last_movement_type_code.clone(),
        last_movement_reason_code: record.last_movement_reason_code.clone(),

        category: record.category_code.clone(),
        csra: record.csra.clone(),

        date_of_birth: record.date_of_birth,
        first_name: record.first_name.clone(),
        middle_names: record.middle_name.clone(),
        last_name: record.last_name.clone(),

        aliases: Vec::new(),
        alerts: Vec::new(),

        gender: attributes.and_then(|a| a.gender.clone()),
        ethnicity: attributes.and_then(|a| a.ethnicity.clone()),
        height_centimetres: attributes.and_then(|a| a.height_centimetres),
        weight_kilograms: attributes.and_then(|a| a.weight_kilograms),

        hair_colour: features.hair_colour,
        right_eye_colour: features.right_eye_colour,
        left_eye_colour: features.left_eye_colour,
        facial_hair: features.facial_hair,
        shape_of_face: features.shape_of_face,
        build: features.build,
        shoe_size: features.shoe_size,

        tattoos: Vec::new(),
        scars: Vec::new(),
        marks: Vec::new(),
        other_marks: Vec::new(),

        nationality: first_profile_value(record, NATIONALITY_PROFILE).map(str::to_string),
        religion: first_profile_value(record, RELIGION_PROFILE).map(str::to_string),
        marital_status: first_profile_value(record, MARITAL_STATUS_PROFILE).map(str::to_string),
        youth_offender: is_youth_offender(record),

        sentence_start_date: sentence.and_then(|s| s.sentence_start_date),
        confirmed_release_date: sentence.and_then(|s| s.confirmed_release_date),
        release_date: sentence.and_then(|s| s.release_date),
        sentence_expiry_date: sentence.and_then(|s| s.sentence_expiry_date),
        licence_expiry_date: sentence.and_then(|s| s.licence_expiry_date),
        home_detention_curfew_eligibility_date: sentence
            .and_then(|s| s.home_detention_curfew_eligibility_date),
        home_detention_curfew_actual_date: sentence
            .and_then(|s| s.home_detention_curfew_actual_date),
        home_detention_curfew_end_date: sentence.and_then(|s| s.home_detention_curfew_end_date),
        topup_supervision_start_date: sentence.and_then(|s| s.topup_supervision_start_date),
        topup_supervision_expiry_date: sentence.and_then(|s| s.topup_supervision_expiry_date),
        additional_days_awarded: sentence.and_then(|s| s.additional_days_awarded),
        non_dto_release_date: sentence.and_then(|s| s.non_dto_release_date),
        non_dto_release_date_type: sentence.and_then(|s| s.non_dto_release_date_type.clone()),
        tariff_date: sentence.and_then(|s| s.tariff_date),

        reception_date: record.reception_date,
        parole_eligibility_date: sentence.and_then(|s| s.parole_eligibility_date),
        automatic_release_date: sentence
            .and_then(|s| s.automatic_release_override_date.or(s.automatic_release_date)),
        post_recall_release_date: sentence
            .and_then(|s| s.post_recall_release_override_date.or(s.post_recall_release_date)),
        conditional_release_date: sentence
            .and_then(|s| s.conditional_release_override_date.or(s.conditional_release_date)),
        actual_parole_date: sentence.and_then(|s| s.actual_parole_date),

        location_description: record.location_description.clone(),
        most_serious_offence: most_serious_offence(record, identity.booking_id),
        recall: record.recall,
        legal_status: record.legal_status.clone(),
        imprisonment_status: record.imprisonment_status.clone(),
        imprisonment_status_description: record.imprisonment_status_description.clone(),
        indeterminate_sentence: has_indeterminate_sentence(record, identity.booking_id),

        restricted_patient: false,
        supporting_prison_id: None,
        discharged_hospital_id: None,
        discharged_hospital_description: None,
        discharge_date: None,
        discharge_details: None,

        current_incentive: None,
    }
}
