//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into services. The parsing
//! helpers take the raw environment values as `Option<String>` so that request handling
//! and tests never read process-wide environment variables.

use crate::{IndexerError, IndexerResult};
use incentives::{IncentivesConfig, DEFAULT_TIMEOUT};
use std::time::Duration;

/// Indexer configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct IndexerConfig {
    incentives: IncentivesConfig,
}

impl IndexerConfig {
    pub fn new(incentives: IncentivesConfig) -> Self {
        Self { incentives }
    }

    /// Build configuration from raw environment values.
    ///
    /// # Arguments
    ///
    /// * `incentives_url` - Base URL of the incentive service (required).
    /// * `incentives_timeout` - Lookup timeout such as `20s` or `1500ms`; defaults to 20s.
    /// * `incentives_token` - Optional bearer token for the incentive service.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::InvalidConfig`] if the URL is missing or the timeout cannot be
    /// parsed, and [`IndexerError::Incentives`] if the incentive settings are rejected.
    pub fn from_env_values(
        incentives_url: Option<String>,
        incentives_timeout: Option<String>,
        incentives_token: Option<String>,
    ) -> IndexerResult<Self> {
        let url = incentives_url
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| IndexerError::InvalidConfig("incentive service URL is not set".into()))?;
        let timeout = incentives_timeout_from_env_value(incentives_timeout)?;

        Ok(Self::new(IncentivesConfig::new(url, timeout, incentives_token)?))
    }

    pub fn incentives(&self) -> &IncentivesConfig {
        &self.incentives
    }
}

/// Parse the incentive lookup timeout from an optional string value.
///
/// Accepts `<n>ms`, `<n>s`, `<n>m` or a bare number of seconds. `None` or a blank value
/// gives [`DEFAULT_TIMEOUT`].
pub fn incentives_timeout_from_env_value(value: Option<String>) -> IndexerResult<Duration> {
    let Some(value) = value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty())
    else {
        return Ok(DEFAULT_TIMEOUT);
    };

    let invalid = || IndexerError::InvalidConfig(format!("invalid incentive timeout '{value}'"));

    let (digits, millis_per_unit) = if let Some(digits) = value.strip_suffix("ms") {
        (digits, 1)
    } else if let Some(digits) = value.strip_suffix('s') {
        (digits, 1_000)
    } else if let Some(digits) = value.strip_suffix('m') {
        (digits, 60_000)
    } else {
        (value.as_str(), 1_000)
    };

    let amount: u64 = digits.trim().parse().map_err(|_| invalid())?;
    if amount == 0 {
        return Err(invalid());
    }
    let millis = amount.checked_mul(millis_per_unit).ok_or_else(invalid)?;
    Ok(Duration::from_millis(millis))
}
