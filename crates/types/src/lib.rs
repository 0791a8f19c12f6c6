//! Validated identity types shared across the indexer crates.
//!
//! A booking record can only be translated once both of its identity fields are known:
//! the prisoner number (the document key) and the booking id (used for incentive lookups
//! and for filtering offence history and sentence terms to the current booking).

use std::fmt;

/// Errors that can occur when creating validated identity types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TypeError {
    /// The prisoner number was empty or contained only whitespace.
    #[error("prisoner number cannot be empty")]
    EmptyPrisonerNumber,

    /// The booking id was zero or negative.
    #[error("booking id must be positive, got {0}")]
    NonPositiveBookingId(i64),
}

/// A prisoner number, for example `A1234AA`.
///
/// Input is trimmed and uppercased during construction so that the same person always
/// produces the same document key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrisonerNumber(String);

impl PrisonerNumber {
    /// Creates a new `PrisonerNumber` from the given input.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::EmptyPrisonerNumber`] if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TypeError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TypeError::EmptyPrisonerNumber);
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrisonerNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PrisonerNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for PrisonerNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for PrisonerNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PrisonerNumber::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Identifier of a single custodial episode (booking) in the source-of-record system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookingId(i64);

impl BookingId {
    /// Creates a new `BookingId`.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::NonPositiveBookingId`] for zero or negative values; the source
    /// system allocates booking ids from a positive sequence.
    pub fn new(value: i64) -> Result<Self, TypeError> {
        if value <= 0 {
            return Err(TypeError::NonPositiveBookingId(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for BookingId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for BookingId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        BookingId::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prisoner_number_is_trimmed_and_uppercased() {
        let number = PrisonerNumber::new("  a1234aa ").expect("valid prisoner number");
        assert_eq!(number.as_str(), "A1234AA");
        assert_eq!(number.to_string(), "A1234AA");
    }

    #[test]
    fn prisoner_number_rejects_blank_input() {
        assert_eq!(
            PrisonerNumber::new("   "),
            Err(TypeError::EmptyPrisonerNumber)
        );
    }

    #[test]
    fn booking_id_rejects_non_positive_values() {
        assert_eq!(BookingId::new(0), Err(TypeError::NonPositiveBookingId(0)));
        assert_eq!(BookingId::new(-3), Err(TypeError::NonPositiveBookingId(-3)));
        assert_eq!(BookingId::new(1200).map(BookingId::value), Ok(1200));
    }

    #[test]
    fn deserialisation_validates_values() {
        let number: PrisonerNumber = serde_json::from_str("\"g4800uu\"").expect("valid");
        assert_eq!(number.as_str(), "G4800UU");

        assert!(serde_json::from_str::<PrisonerNumber>("\"\"").is_err());
        assert!(serde_json::from_str::<BookingId>("-1").is_err());
    }
}
