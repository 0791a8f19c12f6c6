//! Identity fields a booking record must carry before it can be translated.

use crate::{IndexerError, IndexerResult};
use indexer_types::{BookingId, PrisonerNumber};
use nomis::BookingRecord;

/// The validated identity of a booking record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingIdentity {
    pub prisoner_number: PrisonerNumber,
    pub booking_id: BookingId,
}

impl BookingIdentity {
    /// Extract and validate the identity of a booking record.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::MissingPrisonerNumber`] or [`IndexerError::MissingBookingId`]
    /// when a field is absent, and [`IndexerError::InvalidIdentity`] when it is present but
    /// unusable (blank number, non-positive id).
    pub fn from_record(record: &BookingRecord) -> IndexerResult<Self> {
        let prisoner_number = record
            .offender_no
            .as_deref()
            .ok_or(IndexerError::MissingPrisonerNumber)?;
        let booking_id = record.booking_id.ok_or(IndexerError::MissingBookingId)?;

        Ok(Self {
            prisoner_number: PrisonerNumber::new(prisoner_number)?,
            booking_id: BookingId::new(booking_id)?,
        })
    }
}
