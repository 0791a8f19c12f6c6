//! # Indexer Core
//!
//! Translation of booking records into search-ready prisoner documents.
//!
//! This crate contains the translation and enrichment pipeline:
//! - Scalar field mapping with per-field precedence rules ([`field_mapper`])
//! - Folding of aliases, active alerts and physical marks into list fields ([`collections`])
//! - Incentive resolution with fallback to the previously indexed document ([`incentive`])
//! - The translator composing all of the above ([`translate`])
//!
//! **No storage or scheduling concerns**: writing documents to the search index and deciding
//! when a record is re-translated belong to the callers of this crate.

pub mod collections;
pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod field_mapper;
pub mod identity;
pub mod incentive;
pub mod pnc;
pub mod restricted_patient;
pub mod service;
pub mod translator;

pub use config::IndexerConfig;
pub use document::{
    BodyPartDetail, CurrentIncentive, IncentiveLevelSummary, PrisonerAlert, PrisonerAlias,
    PrisonerDocument,
};
pub use error::{IndexerError, IndexerResult};
pub use identity::BookingIdentity;
pub use incentive::resolve_incentive;
pub use restricted_patient::{Agency, RestrictedPatient};
pub use service::{IncentiveLookup, TranslationService};
pub use translator::translate;
