//! Constants used throughout the indexer core crate.
//!
//! Source type codes are kept here so the mapping tables and their tests agree on spelling.

/// Identifier type code for a Police National Computer number.
pub const PNC_IDENTIFIER: &str = "PNC";

/// Identifier type code for a Criminal Records Office number.
pub const CRO_IDENTIFIER: &str = "CRO";

/// Profile information type code for nationality.
pub const NATIONALITY_PROFILE: &str = "NAT";

/// Profile information type code for religion.
pub const RELIGION_PROFILE: &str = "RELF";

/// Profile information type code for marital status.
pub const MARITAL_STATUS_PROFILE: &str = "MARITAL";

/// Profile information type code for the youth offender flag.
pub const YOUTH_PROFILE: &str = "YOUTH";

/// Two-digit PNC years up to and including this value are in the 2000s; later ones in the
/// 1900s.
pub const PNC_CENTURY_PIVOT: u16 = 39;

/// Environment variable holding the incentive service base URL.
pub const INCENTIVES_URL_ENV: &str = "INCENTIVES_API_URL";

/// Environment variable holding the incentive lookup timeout (for example `20s`).
pub const INCENTIVES_TIMEOUT_ENV: &str = "INCENTIVES_API_TIMEOUT";

/// Environment variable holding an optional bearer token for the incentive service.
pub const INCENTIVES_TOKEN_ENV: &str = "INCENTIVES_API_TOKEN";
