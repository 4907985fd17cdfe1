//! Claim structures for the signed-token classes.
//!
//! Both classes carry the same identity payload: the member's email as
//! `sub`, the member id, and issued-at / expiry Unix timestamps. Refresh
//! claims additionally carry a `jti` so that two rotations inside the same
//! second still produce distinct token strings.

use serde::{Deserialize, Serialize};

/// Access to the expiry field shared by every token class, used by the
/// codec's inclusive boundary check.
pub trait TokenClaims {
    /// Expiry as a Unix timestamp (seconds).
    fn expires_at(&self) -> i64;
}

/// Claims carried by access tokens.
///
/// Identity only: the member's role is deliberately absent and re-resolved
/// on every authentication, so role changes take effect without waiting
/// for the token to lapse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Member email (subject claim)
    pub sub: String,
    /// Member id
    #[serde(rename = "memberId")]
    pub member_id: i64,
    /// Issued-at (Unix timestamp)
    pub iat: i64,
    /// Expiry (Unix timestamp)
    pub exp: i64,
}

/// Claims carried by refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Member email (subject claim)
    pub sub: String,
    /// Member id, also the refresh record's lookup key
    #[serde(rename = "memberId")]
    pub member_id: i64,
    /// Issued-at (Unix timestamp)
    pub iat: i64,
    /// Expiry (Unix timestamp)
    pub exp: i64,
    /// Unique token identifier (JWT ID) to ensure token uniqueness
    pub jti: String,
}

impl TokenClaims for AccessClaims {
    fn expires_at(&self) -> i64 {
        self.exp
    }
}

impl TokenClaims for RefreshClaims {
    fn expires_at(&self) -> i64 {
        self.exp
    }
}
