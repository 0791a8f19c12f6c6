//! # Incentives
//!
//! Lookup of the current incentive level for a booking.
//!
//! This crate contains:
//! - The incentive level wire model ([`IncentiveLevel`])
//! - A three-way lookup result ([`LookupOutcome`]) that keeps "no incentive recorded"
//!   apart from "the service could not be asked"
//! - An HTTP client bounded by a configurable timeout ([`IncentivesClient`])
//!
//! **No retry policy**: a failed lookup is reported once; deciding whether to try again
//! belongs to whatever schedules translations.

pub mod client;
pub mod level;
pub mod outcome;

pub use client::{IncentivesClient, IncentivesConfig, DEFAULT_TIMEOUT};
pub use level::IncentiveLevel;
pub use outcome::LookupOutcome;

use std::time::Duration;

/// Errors raised while configuring or calling the incentive service.
///
/// Lookup failures are carried inside [`LookupOutcome::Failed`], so this type is `Clone`
/// and holds rendered messages rather than the underlying transport errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IncentivesError {
    #[error("invalid incentives configuration: {0}")]
    InvalidConfig(String),

    #[error("incentive lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("incentive lookup transport error: {0}")]
    Transport(String),

    #[error("incentive service returned unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("invalid incentive response: {0}")]
    InvalidResponse(String),
}

pub type IncentivesResult<T> = std::result::Result<T, IncentivesError>;
