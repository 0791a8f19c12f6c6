//! Booking record to prisoner document translation.
//!
//! Translation is a pure function of its inputs: it reads no clock, touches no shared
//! state and never mutates the booking record or the existing document, so records can be
//! translated in parallel.

use crate::collections::{merge_active_alerts, merge_aliases, merge_marks};
use crate::document::PrisonerDocument;
use crate::field_mapper::map_fields;
use crate::identity::BookingIdentity;
use crate::incentive::resolve_incentive;
use crate::restricted_patient::{location_description, RestrictedPatient};
use crate::IndexerResult;
use incentives::{IncentiveLevel, LookupOutcome};
use nomis::BookingRecord;

/// Translate a booking record into a new prisoner document.
///
/// # Arguments
///
/// * `existing` - The previously indexed document for this prisoner, consulted only to keep
///   the current incentive when the incentive lookup failed.
/// * `record` - The booking record to translate.
/// * `incentive` - Outcome of the incentive lookup for this booking.
/// * `restricted_patient` - Restricted-patient details, if the person is one.
///
/// # Errors
///
/// Returns an error, and no document, when the record lacks a usable prisoner number or
/// booking id. No other field problem aborts translation.
pub fn translate(
    existing: Option<&PrisonerDocument>,
    record: &BookingRecord,
    incentive: &LookupOutcome<IncentiveLevel>,
    restricted_patient: Option<&RestrictedPatient>,
) -> IndexerResult<PrisonerDocument> {
    let identity = BookingIdentity::from_record(record)?;

    let existing = existing.filter(|doc| {
        let same_prisoner = doc.prisoner_number == identity.prisoner_number;
        if !same_prisoner {
            tracing::warn!(
                prisoner_number = %identity.prisoner_number,
                existing_prisoner_number = %doc.prisoner_number,
                "ignoring existing document for a different prisoner"
            );
        }
        same_prisoner
    });

    let scalars = map_fields(&identity, record);
    let marks = merge_marks(&record.physical_marks);

    tracing::debug!(
        prisoner_number = %identity.prisoner_number,
        booking_id = %identity.booking_id,
        restricted_patient = restricted_patient.is_some(),
        "translating booking record"
    );

    Ok(PrisonerDocument {
        aliases: merge_aliases(&record.aliases),
        alerts: merge_active_alerts(&record.alerts),
        tattoos: marks.tattoos,
        scars: marks.scars,
        marks: marks.marks,
        other_marks: marks.other_marks,

        location_description: location_description(
            record.location_description.as_deref(),
            restricted_patient,
        ),
        restricted_patient: restricted_patient.is_some(),
        supporting_prison_id: restricted_patient.and_then(|rp| rp.supporting_prison_id.clone()),
        discharged_hospital_id: restricted_patient.and_then(RestrictedPatient::hospital_id),
        discharged_hospital_description: restricted_patient
            .and_then(RestrictedPatient::hospital_description)
            .map(str::to_string),
        discharge_date: restricted_patient.and_then(|rp| rp.discharge_date),
        discharge_details: restricted_patient.and_then(|rp| rp.discharge_details.clone()),

        current_incentive: resolve_incentive(incentive, existing),

        ..scalars
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restricted_patient::Agency;
    use crate::IndexerError;
    use chrono::{NaiveDate, NaiveDateTime};
    use incentives::IncentivesError;
    use nomis::{
        Alert, OffenceHistoryDetail, OffenderIdentifier, PhysicalCharacteristic, PhysicalMark,
    };

    fn booking(booking_id: i64) -> BookingRecord {
        BookingRecord {
            offender_no: Some("A1234AA".into()),
            booking_id: Some(booking_id),
            booking_no: Some("38412A".into()),
            first_name: Some("JOHN".into()),
            last_name: Some("SMITH".into()),
            date_of_birth: NaiveDate::from_ymd_opt(1980, 5, 21),
            location_description: Some("Outside - released from Moorland".into()),
            identifiers: vec![OffenderIdentifier {
                type_code: Some("PNC".into()),
                value: Some("12/394773H".into()),
            }],
            alerts: vec![
                Alert {
                    alert_code: Some("XA".into()),
                    active: true,
                    ..Alert::default()
                },
                Alert {
                    alert_code: Some("HA".into()),
                    active: false,
                    expired: true,
                    ..Alert::default()
                },
            ],
            physical_marks: vec![
                PhysicalMark {
                    category: Some("Tattoo".into()),
                    body_part: Some("Arm".into()),
                    comment: Some("Rose".into()),
                    ..PhysicalMark::default()
                },
                PhysicalMark {
                    category: Some("Piercing".into()),
                    body_part: Some("Ear".into()),
                    ..PhysicalMark::default()
                },
            ],
            offence_history: vec![
                OffenceHistoryDetail {
                    booking_id: Some(5),
                    most_serious: true,
                    offence_description: Some("Theft".into()),
                    ..OffenceHistoryDetail::default()
                },
                OffenceHistoryDetail {
                    booking_id: Some(6),
                    most_serious: true,
                    offence_description: Some("Fraud".into()),
                    ..OffenceHistoryDetail::default()
                },
            ],
            ..BookingRecord::default()
        }
    }

    fn level(code: &str) -> IncentiveLevel {
        IncentiveLevel {
            code: code.into(),
            description: "Standard".into(),
            timestamp: NaiveDateTime::parse_from_str(
                "2022-11-10T15:47:24.682335",
                "%Y-%m-%dT%H:%M:%S%.f",
            )
            .expect("timestamp"),
            next_review_date: NaiveDate::from_ymd_opt(2023, 11, 18),
        }
    }

    fn failure() -> LookupOutcome<IncentiveLevel> {
        LookupOutcome::Failed(IncentivesError::Transport("connection reset".into()))
    }

    fn existing_with_standard_incentive() -> PrisonerDocument {
        translate(None, &booking(5), &LookupOutcome::Found(level("STD")), None).expect("existing")
    }

    fn hospital() -> RestrictedPatient {
        RestrictedPatient {
            supporting_prison_id: Some("MDI".into()),
            discharged_hospital: Some(Agency {
                agency_id: "HAZLWD".into(),
                description: Some("Hazelwood House".into()),
            }),
            discharge_date: NaiveDate::from_ymd_opt(2022, 5, 20),
            discharge_details: Some("Getting worse".into()),
        }
    }

    #[test]
    fn composes_scalar_and_list_fields() {
        let doc = translate(None, &booking(5), &LookupOutcome::NotFound, None).expect("translate");

        assert_eq!(doc.prisoner_number.as_str(), "A1234AA");
        assert_eq!(doc.booking_id, "5");
        assert_eq!(doc.book_number.as_deref(), Some("38412A"));
        assert_eq!(doc.pnc_number_canonical_long.as_deref(), Some("2012/394773H"));
        assert_eq!(doc.most_serious_offence.as_deref(), Some("Theft"));
        assert_eq!(doc.alerts.len(), 1);
        assert_eq!(doc.alerts[0].alert_code.as_deref(), Some("XA"));
        assert_eq!(doc.tattoos.len(), 1);
        assert!(doc.scars.is_empty() && doc.marks.is_empty() && doc.other_marks.is_empty());
        assert_eq!(
            doc.location_description.as_deref(),
            Some("Outside - released from Moorland")
        );
        assert!(!doc.restricted_patient);
        assert!(doc.current_incentive.is_none());
    }

    #[test]
    fn missing_booking_id_produces_no_document() {
        let record = BookingRecord {
            booking_id: None,
            ..booking(5)
        };
        assert!(matches!(
            translate(None, &record, &LookupOutcome::NotFound, None),
            Err(IndexerError::MissingBookingId)
        ));
    }

    #[test]
    fn missing_prisoner_number_produces_no_document() {
        let record = BookingRecord {
            offender_no: None,
            ..booking(5)
        };
        assert!(matches!(
            translate(None, &record, &LookupOutcome::NotFound, None),
            Err(IndexerError::MissingPrisonerNumber)
        ));
    }

    #[test]
    fn restricted_patient_overlay() {
        let doc = translate(None, &booking(5), &LookupOutcome::NotFound, Some(&hospital()))
            .expect("translate");

        assert!(doc.restricted_patient);
        assert_eq!(
            doc.location_description.as_deref(),
            Some("Outside - released from Moorland - discharged to Hazelwood House")
        );
        assert_eq!(doc.supporting_prison_id.as_deref(), Some("MDI"));
        assert_eq!(doc.discharged_hospital_id.as_deref(), Some("HAZLWD"));
        assert_eq!(
            doc.discharged_hospital_description.as_deref(),
            Some("Hazelwood House")
        );
        assert_eq!(doc.discharge_date, NaiveDate::from_ymd_opt(2022, 5, 20));
        assert_eq!(doc.discharge_details.as_deref(), Some("Getting worse"));
    }

    #[test]
    fn failed_lookup_keeps_existing_incentive() {
        let existing = existing_with_standard_incentive();

        let doc = translate(Some(&existing), &booking(5), &failure(), None).expect("translate");
        assert_eq!(doc.current_incentive, existing.current_incentive);
        assert_eq!(
            doc.current_incentive
                .as_ref()
                .and_then(|i| i.level.code.as_deref()),
            Some("STD")
        );
    }

    #[test]
    fn not_found_clears_existing_incentive() {
        let existing = existing_with_standard_incentive();

        let doc = translate(Some(&existing), &booking(5), &LookupOutcome::NotFound, None)
            .expect("translate");
        assert!(doc.current_incentive.is_none());
    }

    #[test]
    fn existing_document_contributes_nothing_but_incentive() {
        let mut existing = existing_with_standard_incentive();
        existing.religion = Some("Jedi".into());
        existing.shoe_size = Some(12);

        let doc = translate(Some(&existing), &booking(5), &failure(), None).expect("translate");
        assert!(doc.religion.is_none());
        assert!(doc.shoe_size.is_none());
    }

    #[test]
    fn existing_document_for_another_prisoner_is_ignored() {
        let mut existing = existing_with_standard_incentive();
        existing.prisoner_number = indexer_types::PrisonerNumber::new("Z9999ZZ").expect("number");

        let doc = translate(Some(&existing), &booking(5), &failure(), None).expect("translate");
        assert!(doc.current_incentive.is_none());
    }

    #[test]
    fn malformed_shoe_size_does_not_abort_translation() {
        let record = BookingRecord {
            physical_characteristics: vec![PhysicalCharacteristic {
                type_code: Some("SHOESIZE".into()),
                characteristic: None,
                detail: Some("abc".into()),
            }],
            ..booking(5)
        };

        let doc = translate(None, &record, &LookupOutcome::Found(level("ENH")), None)
            .expect("translate");
        assert!(doc.shoe_size.is_none());
        assert_eq!(doc.first_name.as_deref(), Some("JOHN"));
        assert!(doc.current_incentive.is_some());
    }

    #[test]
    fn translation_is_deterministic() {
        let record = booking(5);
        let outcome = LookupOutcome::Found(level("STD"));

        let first = translate(None, &record, &outcome, Some(&hospital())).expect("translate");
        let second = translate(None, &record, &outcome, Some(&hospital())).expect("translate");
        assert_eq!(first, second);
        assert_eq!(
            first.render().expect("render"),
            second.render().expect("render")
        );
    }
}
