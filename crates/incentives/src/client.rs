//! HTTP client for the incentive service.

use std::time::Duration;

use indexer_types::BookingId;
use reqwest::StatusCode;

use crate::{IncentiveLevel, IncentivesError, IncentivesResult, LookupOutcome};

/// Timeout applied when no explicit value is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Connection settings for the incentive service, resolved once at startup.
#[derive(Clone, Debug)]
pub struct IncentivesConfig {
    base_url: String,
    timeout: Duration,
    auth_token: Option<String>,
}

impl IncentivesConfig {
    /// Create a new `IncentivesConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`IncentivesError::InvalidConfig`] if the base URL is not an `http(s)` URL or
    /// the timeout is zero.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        auth_token: Option<String>,
    ) -> IncentivesResult<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(IncentivesError::InvalidConfig(format!(
                "base URL must start with http:// or https://, got '{base_url}'"
            )));
        }
        if timeout.is_zero() {
            return Err(IncentivesError::InvalidConfig(
                "timeout must be greater than zero".into(),
            ));
        }

        Ok(Self {
            base_url,
            timeout,
            auth_token: auth_token
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Client for fetching the current incentive level of a booking.
///
/// Each lookup is a single request. A `404`, a `204` or an empty success body is a confirmed
/// absence; every other problem is reported as [`LookupOutcome::Failed`]. No retries are
/// attempted.
#[derive(Clone, Debug)]
pub struct IncentivesClient {
    cfg: IncentivesConfig,
    http: reqwest::Client,
}

impl IncentivesClient {
    /// Creates a new client from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IncentivesError::InvalidConfig`] if the underlying HTTP client cannot be
    /// built (for example, TLS initialisation failed).
    pub fn new(cfg: IncentivesConfig) -> IncentivesResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| {
                IncentivesError::InvalidConfig(format!("failed to build HTTP client: {e}"))
            })?;
        Ok(Self { cfg, http })
    }

    fn current_incentive_url(&self, booking_id: BookingId) -> String {
        format!(
            "{}/iep/reviews/booking/{}?with-details=false",
            self.cfg.base_url, booking_id
        )
    }

    /// Fetch the current incentive level for a booking.
    ///
    /// The whole exchange (connect, response, body) is bounded by the configured timeout;
    /// expiry is reported as [`IncentivesError::Timeout`] inside a failed outcome.
    pub async fn fetch(&self, booking_id: BookingId) -> LookupOutcome<IncentiveLevel> {
        tracing::debug!(%booking_id, "fetching current incentive");

        let result = match tokio::time::timeout(self.cfg.timeout, self.request(booking_id)).await
        {
            Ok(result) => result,
            Err(_) => Err(IncentivesError::Timeout(self.cfg.timeout)),
        };

        if let Err(err) = &result {
            tracing::warn!(%booking_id, error = %err, "incentive lookup failed");
        }
        result.into()
    }

    async fn request(&self, booking_id: BookingId) -> IncentivesResult<Option<IncentiveLevel>> {
        let mut request = self.http.get(self.current_incentive_url(booking_id));
        if let Some(token) = &self.cfg.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::NO_CONTENT {
            tracing::debug!(%booking_id, %status, "no incentive recorded for booking");
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IncentivesError::UnexpectedStatus {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            tracing::debug!(%booking_id, %status, "empty incentive response for booking");
            return Ok(None);
        }
        serde_json::from_slice::<IncentiveLevel>(&body)
            .map(Some)
            .map_err(|e| IncentivesError::InvalidResponse(e.to_string()))
    }

    fn transport_error(&self, err: reqwest::Error) -> IncentivesError {
        if err.is_timeout() {
            IncentivesError::Timeout(self.cfg.timeout)
        } else {
            IncentivesError::Transport(err.to_string())
        }
    }
}
