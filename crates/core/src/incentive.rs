//! Resolution of a document's current incentive from a lookup outcome.

use crate::document::{CurrentIncentive, IncentiveLevelSummary, PrisonerDocument};
use chrono::SubsecRound;
use incentives::{IncentiveLevel, LookupOutcome};

impl From<&IncentiveLevel> for CurrentIncentive {
    fn from(level: &IncentiveLevel) -> Self {
        CurrentIncentive {
            level: IncentiveLevelSummary {
                code: Some(level.code.clone()),
                description: level.description.clone(),
            },
            date_time: level.timestamp.trunc_subsecs(0),
            next_review_date: level.next_review_date,
        }
    }
}

/// Decide the incentive snapshot for a new document.
///
/// - `Found`: the fetched level, truncated to whole seconds.
/// - `NotFound`: none, whatever the existing document held.
/// - `Failed`: the existing document's snapshot, unchanged.
pub fn resolve_incentive(
    outcome: &LookupOutcome<IncentiveLevel>,
    existing: Option<&PrisonerDocument>,
) -> Option<CurrentIncentive> {
    match outcome {
        LookupOutcome::Found(level) => Some(CurrentIncentive::from(level)),
        LookupOutcome::NotFound => None,
        LookupOutcome::Failed(err) => {
            let fallback = existing.and_then(|doc| doc.current_incentive.clone());
            tracing::warn!(
                error = %err,
                kept_existing = fallback.is_some(),
                "incentive lookup failed; keeping previously indexed incentive"
            );
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, Timelike};
    use incentives::IncentivesError;

    fn timestamp(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").expect("timestamp")
    }

    fn level(code: &str, at: &str) -> IncentiveLevel {
        IncentiveLevel {
            code: code.into(),
            description: "Standard".into(),
            timestamp: timestamp(at),
            next_review_date: NaiveDate::from_ymd_opt(2023, 11, 18),
        }
    }

    fn existing_with(incentive: Option<CurrentIncentive>) -> PrisonerDocument {
        let mut doc =
            PrisonerDocument::parse(r#"{ "prisonerNumber": "A1234AA", "bookingId": "1" }"#)
                .expect("document");
        doc.current_incentive = incentive;
        doc
    }

    fn standard() -> CurrentIncentive {
        CurrentIncentive::from(&level("STD", "2021-06-01T10:00:00"))
    }

    fn failure() -> LookupOutcome<IncentiveLevel> {
        LookupOutcome::Failed(IncentivesError::Timeout(std::time::Duration::from_secs(20)))
    }

    #[test]
    fn found_level_is_truncated_to_seconds() {
        let outcome = LookupOutcome::Found(level("ENH", "2022-11-10T15:47:24.682335"));

        let incentive = resolve_incentive(&outcome, None).expect("incentive");
        assert_eq!(incentive.level.code.as_deref(), Some("ENH"));
        assert_eq!(incentive.level.description, "Standard");
        assert_eq!(incentive.date_time, timestamp("2022-11-10T15:47:24"));
        assert_eq!(incentive.date_time.nanosecond(), 0);
        assert_eq!(incentive.next_review_date, NaiveDate::from_ymd_opt(2023, 11, 18));
    }

    #[test]
    fn truncation_is_idempotent() {
        let once = CurrentIncentive::from(&level("STD", "2022-11-10T15:47:24.999999"));
        let again = CurrentIncentive::from(&IncentiveLevel {
            timestamp: once.date_time,
            ..level("STD", "2000-01-01T00:00:00")
        });
        assert_eq!(once.date_time, again.date_time);
        assert_eq!(once.date_time, timestamp("2022-11-10T15:47:24"));
    }

    #[test]
    fn found_level_replaces_existing() {
        let existing = existing_with(Some(standard()));
        let outcome = LookupOutcome::Found(level("BAS", "2023-01-01T00:00:00"));

        let incentive = resolve_incentive(&outcome, Some(&existing)).expect("incentive");
        assert_eq!(incentive.level.code.as_deref(), Some("BAS"));
    }

    #[test]
    fn not_found_clears_existing_incentive() {
        let existing = existing_with(Some(standard()));
        assert!(resolve_incentive(&LookupOutcome::NotFound, Some(&existing)).is_none());
        assert!(resolve_incentive(&LookupOutcome::NotFound, None).is_none());
    }

    #[test]
    fn failure_keeps_existing_incentive_unchanged() {
        let existing = existing_with(Some(standard()));
        assert_eq!(
            resolve_incentive(&failure(), Some(&existing)),
            Some(standard())
        );
    }

    #[test]
    fn failure_without_existing_incentive_is_none() {
        assert!(resolve_incentive(&failure(), None).is_none());
        assert!(resolve_incentive(&failure(), Some(&existing_with(None))).is_none());
    }
}
