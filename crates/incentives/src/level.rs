//! Incentive level wire model.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The current incentive level for a booking, as returned by the incentive service.
///
/// `timestamp` keeps whatever precision the service sends (typically microseconds);
/// truncation to whole seconds happens when the level is copied into a document.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct IncentiveLevel {
    #[serde(rename = "iepCode")]
    pub code: String,

    #[serde(rename = "iepLevel")]
    pub description: String,

    #[serde(rename = "iepTime")]
    pub timestamp: NaiveDateTime,

    #[serde(rename = "nextReviewDate", default)]
    pub next_review_date: Option<NaiveDate>,
}
