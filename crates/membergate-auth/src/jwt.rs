//! Token creation and verification.
//!
//! One algorithm (HMAC-SHA-256 compact JWS) serves both token classes;
//! the access and refresh entry points only fix which secret and validity
//! window from [`JwtConfig`] apply. The config is passed in at every call
//! so the codec holds no ambient key state and tests can run with
//! arbitrary secrets.
//!
//! Verification rejects, in order: undecodable tokens
//! ([`AuthError::MalformedToken`]), signatures that do not match the
//! class's secret ([`AuthError::InvalidSignature`], which is also what a
//! token presented to the wrong class fails with), and lapsed tokens
//! ([`AuthError::Expired`]). Expiry is checked with zero leeway and an
//! inclusive boundary.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use membergate_config::JwtConfig;

use crate::claims::{AccessClaims, RefreshClaims, TokenClaims};
use crate::error::AuthError;

fn sign_claims<T: Serialize>(claims: &T, secret: &[u8]) -> Result<String, AuthError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(AuthError::Encode)
}

fn decode_claims<T>(token: &str, secret: &[u8]) -> Result<T, AuthError>
where
    T: DeserializeOwned + TokenClaims,
{
    let mut validation = Validation::default();
    validation.leeway = 0;

    let data = decode::<T>(token, &DecodingKey::from_secret(secret), &validation).map_err(|e| {
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::MalformedToken,
        }
    })?;

    // Inclusive boundary: a token whose exp equals the current second is
    // already expired.
    if Utc::now().timestamp() >= data.claims.expires_at() {
        return Err(AuthError::Expired);
    }

    Ok(data.claims)
}

/// Creates an access token for the given member.
///
/// The token carries identity only (subject email and member id); the
/// member's role is re-resolved at authentication time.
///
/// # Errors
///
/// Returns [`AuthError::Encode`] if token encoding fails.
pub fn create_access_token(
    member_id: i64,
    email: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();

    let claims = AccessClaims {
        sub: email.to_string(),
        member_id,
        iat: now,
        exp: now + jwt_config.access_token_expiry,
    };

    sign_claims(&claims, jwt_config.access_secret.as_bytes())
}

/// Verifies an access token against the access secret and returns its
/// claims.
pub fn verify_access_token(token: &str, jwt_config: &JwtConfig) -> Result<AccessClaims, AuthError> {
    decode_claims(token, jwt_config.access_secret.as_bytes())
}

/// Creates a refresh token for the given member.
///
/// Carries a fresh `jti` so consecutive rotations inside the same second
/// still yield distinct token strings.
pub fn create_refresh_token(
    member_id: i64,
    email: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();

    let claims = RefreshClaims {
        sub: email.to_string(),
        member_id,
        iat: now,
        exp: now + jwt_config.refresh_token_expiry,
        jti: Uuid::new_v4().to_string(),
    };

    sign_claims(&claims, jwt_config.refresh_secret.as_bytes())
}

/// Verifies a refresh token against the refresh secret and returns its
/// claims.
///
/// Signature validity alone does not make a refresh token usable; the
/// caller must still match it against the store record.
pub fn verify_refresh_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<RefreshClaims, AuthError> {
    decode_claims(token, jwt_config.refresh_secret.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            access_secret: "access-secret-for-tests-32-chars-min".to_string(),
            refresh_secret: "refresh-secret-for-tests-32-chars-min".to_string(),
            access_token_expiry: 1800,
            refresh_token_expiry: 604800,
        }
    }

    #[test]
    fn test_access_token_roundtrip() {
        let config = get_test_jwt_config();

        let token = create_access_token(42, "member@example.com", &config).unwrap();
        let claims = verify_access_token(&token, &config).unwrap();

        assert_eq!(claims.sub, "member@example.com");
        assert_eq!(claims.member_id, 42);
        assert_eq!(claims.exp, claims.iat + config.access_token_expiry);
    }

    #[test]
    fn test_refresh_token_roundtrip() {
        let config = get_test_jwt_config();

        let token = create_refresh_token(42, "member@example.com", &config).unwrap();
        let claims = verify_refresh_token(&token, &config).unwrap();

        assert_eq!(claims.sub, "member@example.com");
        assert_eq!(claims.member_id, 42);
        assert_eq!(claims.exp, claims.iat + config.refresh_token_expiry);
    }

    #[test]
    fn test_cross_secret_rejection_both_directions() {
        let config = get_test_jwt_config();

        let access = create_access_token(1, "a@x.com", &config).unwrap();
        let refresh = create_refresh_token(1, "a@x.com", &config).unwrap();

        assert!(matches!(
            verify_refresh_token(&access, &config),
            Err(AuthError::InvalidSignature)
        ));
        assert!(matches!(
            verify_access_token(&refresh, &config),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let config = get_test_jwt_config();
        let token = create_access_token(1, "a@x.com", &config).unwrap();

        let other = JwtConfig {
            access_secret: "a-completely-different-access-secret".to_string(),
            ..get_test_jwt_config()
        };

        assert!(matches!(
            verify_access_token(&token, &other),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_malformed_and_empty_tokens() {
        let config = get_test_jwt_config();

        assert!(matches!(
            verify_access_token("not.a.token", &config),
            Err(AuthError::MalformedToken)
        ));
        assert!(matches!(
            verify_access_token("", &config),
            Err(AuthError::MalformedToken)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp();

        let claims = AccessClaims {
            sub: "a@x.com".to_string(),
            member_id: 1,
            iat: now - 3600,
            exp: now - 1800,
        };
        let token = sign_claims(&claims, config.access_secret.as_bytes()).unwrap();

        assert!(matches!(
            verify_access_token(&token, &config),
            Err(AuthError::Expired)
        ));
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp();

        // exp == now: already expired.
        let at_boundary = AccessClaims {
            sub: "a@x.com".to_string(),
            member_id: 1,
            iat: now - 1800,
            exp: now,
        };
        let token = sign_claims(&at_boundary, config.access_secret.as_bytes()).unwrap();
        assert!(matches!(
            verify_access_token(&token, &config),
            Err(AuthError::Expired)
        ));

        // Still inside the window: valid.
        let inside = AccessClaims {
            sub: "a@x.com".to_string(),
            member_id: 1,
            iat: now,
            exp: now + 30,
        };
        let token = sign_claims(&inside, config.access_secret.as_bytes()).unwrap();
        assert!(verify_access_token(&token, &config).is_ok());
    }

    #[test]
    fn test_refresh_tokens_unique_within_same_second() {
        let config = get_test_jwt_config();

        let first = create_refresh_token(1, "a@x.com", &config).unwrap();
        let second = create_refresh_token(1, "a@x.com", &config).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_refresh_outlives_access() {
        let config = get_test_jwt_config();

        let access = verify_access_token(
            &create_access_token(1, "a@x.com", &config).unwrap(),
            &config,
        )
        .unwrap();
        let refresh = verify_refresh_token(
            &create_refresh_token(1, "a@x.com", &config).unwrap(),
            &config,
        )
        .unwrap();

        assert!(refresh.exp > access.exp);
    }
}
