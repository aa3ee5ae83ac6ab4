use serde::{Deserialize, Serialize};

/// Session token claims (transport-agnostic).
///
/// Timestamps are Unix seconds, matching the JWT `iat`/`exp` registered
/// claims. Time-window checks happen during signature verification in the
/// token service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated username.
    pub sub: String,

    /// Issued-at timestamp (Unix seconds).
    pub iat: i64,

    /// Expiration timestamp (Unix seconds).
    pub exp: i64,
}
