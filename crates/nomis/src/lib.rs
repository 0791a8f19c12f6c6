//! Booking-record wire/boundary support.
//!
//! This crate provides the **wire model** for a booking record as served by the prison
//! source-of-record system, plus a parser that reports the failing JSON path when the
//! payload does not match.
//!
//! Notes:
//! - Only the fields consumed by translation are modelled. Unknown keys are ignored because
//!   the upstream API grows fields independently of this indexer.
//! - Every field is optional, and `null` collections decode as empty. Absence is a normal
//!   state for partially populated bookings.

pub mod booking;

pub use booking::{
    Alert, Alias, AssignedLivingUnit, BookingRecord, OffenceHistoryDetail, OffenderIdentifier,
    PhysicalAttributes, PhysicalCharacteristic, PhysicalMark, ProfileInformation,
    SentenceDetail, SentenceTerm,
};

/// Errors returned by the `nomis` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum NomisError {
    #[error("booking record schema mismatch at {path}: {source}")]
    Schema {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Type alias for Results that can fail with a [`NomisError`].
pub type NomisResult<T> = Result<T, NomisError>;
