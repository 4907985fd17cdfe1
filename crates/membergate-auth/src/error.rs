//! Authentication failure taxonomy.
//!
//! Library code returns [`AuthError`]; the HTTP boundary converts it with
//! [`AuthError::into_app`]. Verification and session failures become the
//! UNAUTHENTICATED terminal (401), role failures the FORBIDDEN terminal
//! (403), and store outages a retryable 503. An unreachable store is
//! never reported as "no session".

use membergate_core::AppError;
use membergate_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Token cannot be decoded at all.
    #[error("token is malformed")]
    MalformedToken,

    /// Signature does not verify against the declared class's secret.
    #[error("token signature mismatch")]
    InvalidSignature,

    /// Expiry has passed. The boundary is inclusive: `exp == now` is
    /// already expired.
    #[error("token has expired")]
    Expired,

    /// Claims reference a member that cannot be resolved.
    #[error("no member matches the token subject")]
    UnknownPrincipal,

    /// No refresh record on file, or the presented refresh token has been
    /// superseded by a rotation.
    #[error("no active session, log in again")]
    SessionNotFound,

    /// Valid principal, insufficient role.
    #[error("insufficient privileges")]
    Forbidden,

    /// The member-lookup collaborator failed (I/O, corrupt row).
    #[error("member lookup failed")]
    Lookup(#[source] anyhow::Error),

    /// Token encoding failed.
    #[error("failed to encode token")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthError {
    /// Maps this failure onto the HTTP-facing error type.
    pub fn into_app(self) -> AppError {
        match self {
            AuthError::MalformedToken
            | AuthError::InvalidSignature
            | AuthError::Expired
            | AuthError::UnknownPrincipal
            | AuthError::SessionNotFound => AppError::unauthorized(self),
            AuthError::Forbidden => AppError::forbidden(self),
            AuthError::Store(_) => AppError::unavailable(self),
            AuthError::Lookup(_) | AuthError::Encode(_) => AppError::internal(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_failures_are_unauthenticated() {
        for err in [
            AuthError::MalformedToken,
            AuthError::InvalidSignature,
            AuthError::Expired,
            AuthError::UnknownPrincipal,
            AuthError::SessionNotFound,
        ] {
            assert_eq!(err.into_app().code(), "UNAUTHENTICATED");
        }
    }

    #[test]
    fn test_forbidden_is_distinct_from_unauthenticated() {
        assert_eq!(AuthError::Forbidden.into_app().code(), "FORBIDDEN");
    }

    #[test]
    fn test_store_outage_is_retryable_not_a_logout() {
        let err = AuthError::Store(StoreError::Timeout(std::time::Duration::from_secs(2)));
        assert_eq!(err.into_app().code(), "UNAVAILABLE");
    }
}
