//! One-record translation with incentive enrichment.
//!
//! The incentive lookup is the only suspension point. Bounding how many lookups run at
//! once is left to the caller (for example a worker pool draining a queue).

use crate::document::PrisonerDocument;
use crate::identity::BookingIdentity;
use crate::restricted_patient::RestrictedPatient;
use crate::translator::translate;
use crate::IndexerResult;
use incentives::{IncentiveLevel, IncentivesClient, LookupOutcome};
use indexer_types::BookingId;
use nomis::BookingRecord;
use std::future::Future;

/// Source of current incentive levels.
pub trait IncentiveLookup {
    fn current_incentive(
        &self,
        booking_id: BookingId,
    ) -> impl Future<Output = LookupOutcome<IncentiveLevel>> + Send;
}

impl IncentiveLookup for IncentivesClient {
    fn current_incentive(
        &self,
        booking_id: BookingId,
    ) -> impl Future<Output = LookupOutcome<IncentiveLevel>> + Send {
        self.fetch(booking_id)
    }
}

/// Builds prisoner documents: fetch the incentive for the booking, then translate.
#[derive(Clone, Debug)]
pub struct TranslationService<L> {
    lookup: L,
}

impl<L: IncentiveLookup> TranslationService<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Build the document for one booking record.
    ///
    /// The identity is validated before the lookup so that a record which cannot be
    /// translated never costs a network call.
    ///
    /// # Errors
    ///
    /// Returns an error when the record lacks a usable prisoner number or booking id. A
    /// failed incentive lookup is not an error; see [`crate::resolve_incentive`].
    pub async fn build_document(
        &self,
        record: &BookingRecord,
        existing: Option<&PrisonerDocument>,
        restricted_patient: Option<&RestrictedPatient>,
    ) -> IndexerResult<PrisonerDocument> {
        let identity = BookingIdentity::from_record(record)?;
        let outcome = self.lookup.current_incentive(identity.booking_id).await;
        translate(existing, record, &outcome, restricted_patient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IndexerError;
    use chrono::NaiveDateTime;
    use incentives::IncentivesError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone)]
    struct StubLookup {
        outcome: LookupOutcome<IncentiveLevel>,
        calls: Arc<AtomicUsize>,
    }

    impl StubLookup {
        fn new(outcome: LookupOutcome<IncentiveLevel>) -> Self {
            Self {
                outcome,
                calls: Arc::default(),
            }
        }
    }

    impl IncentiveLookup for StubLookup {
        fn current_incentive(
            &self,
            _booking_id: BookingId,
        ) -> impl Future<Output = LookupOutcome<IncentiveLevel>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let outcome = self.outcome.clone();
            async move { outcome }
        }
    }

    fn record() -> BookingRecord {
        BookingRecord::parse(r#"{ "offenderNo": "A1234AA", "bookingId": 1200 }"#)
            .expect("record")
    }

    fn enhanced() -> IncentiveLevel {
        IncentiveLevel {
            code: "ENH".into(),
            description: "Enhanced".into(),
            timestamp: NaiveDateTime::parse_from_str(
                "2024-02-01T12:30:45.5",
                "%Y-%m-%dT%H:%M:%S%.f",
            )
            .expect("timestamp"),
            next_review_date: None,
        }
    }

    #[tokio::test]
    async fn found_incentive_is_recorded() {
        let service = TranslationService::new(StubLookup::new(LookupOutcome::Found(enhanced())));

        let doc = service
            .build_document(&record(), None, None)
            .await
            .expect("document");
        let incentive = doc.current_incentive.expect("incentive");
        assert_eq!(incentive.level.code.as_deref(), Some("ENH"));
        assert_eq!(incentive.date_time.to_string(), "2024-02-01 12:30:45");
    }

    #[tokio::test]
    async fn failed_lookup_falls_back_to_existing_document() {
        let existing = TranslationService::new(StubLookup::new(LookupOutcome::Found(enhanced())))
            .build_document(&record(), None, None)
            .await
            .expect("existing");

        let service = TranslationService::new(StubLookup::new(LookupOutcome::Failed(
            IncentivesError::UnexpectedStatus {
                status: 503,
                body: "unavailable".into(),
            },
        )));
        let doc = service
            .build_document(&record(), Some(&existing), None)
            .await
            .expect("document");
        assert_eq!(doc.current_incentive, existing.current_incentive);
    }

    #[tokio::test]
    async fn invalid_identity_skips_lookup() {
        let lookup = StubLookup::new(LookupOutcome::NotFound);
        let service = TranslationService::new(lookup.clone());
        let record = BookingRecord::parse(r#"{ "offenderNo": "A1234AA" }"#).expect("record");

        let result = service.build_document(&record, None, None).await;
        assert!(matches!(result, Err(IndexerError::MissingBookingId)));
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }
}
