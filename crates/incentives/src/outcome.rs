//! Three-way result of an enrichment lookup.

use crate::{IncentivesError, IncentivesResult};

/// Result of asking a downstream service for optional enrichment data.
///
/// `NotFound` is a confirmed, current absence. `Failed` means the answer is unknown; callers
/// must not treat it as absence, or a transient outage would erase good data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupOutcome<T> {
    Found(T),
    NotFound,
    Failed(IncentivesError),
}

impl<T> LookupOutcome<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, LookupOutcome::Failed(_))
    }

    /// Borrow the found value, if any.
    pub fn found(&self) -> Option<&T> {
        match self {
            LookupOutcome::Found(value) => Some(value),
            LookupOutcome::NotFound | LookupOutcome::Failed(_) => None,
        }
    }
}

impl<T> From<IncentivesResult<Option<T>>> for LookupOutcome<T> {
    fn from(result: IncentivesResult<Option<T>>) -> Self {
        match result {
            Ok(Some(value)) => LookupOutcome::Found(value),
            Ok(None) => LookupOutcome::NotFound,
            Err(err) => LookupOutcome::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_from_result() {
        assert_eq!(LookupOutcome::from(Ok(Some(3))), LookupOutcome::Found(3));
        assert_eq!(
            LookupOutcome::<i32>::from(Ok(None)),
            LookupOutcome::NotFound
        );

        let failed = LookupOutcome::<i32>::from(Err(IncentivesError::Transport(
            "connection refused".into(),
        )));
        assert!(failed.is_failed());
        assert!(failed.found().is_none());
    }
}
