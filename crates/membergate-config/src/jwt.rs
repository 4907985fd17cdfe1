//! JWT signing configuration.
//!
//! Access and refresh tokens are signed with two independent secrets so a
//! compromised access key cannot forge refresh tokens, and vice versa.
//! Both secrets are mandatory environment configuration; there is no
//! in-code default.

use std::env;

#[derive(Clone)]
pub struct JwtConfig {
    /// Secret for the short-lived access token class
    pub access_secret: String,
    /// Secret for the long-lived refresh token class
    pub refresh_secret: String,
    /// Access token validity window in seconds (default: 30 minutes)
    pub access_token_expiry: i64,
    /// Refresh token validity window in seconds, also the TTL of the
    /// server-side refresh record (default: 7 days)
    pub refresh_token_expiry: i64,
}

impl JwtConfig {
    /// Loads the config from the environment.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_ACCESS_SECRET` or `JWT_REFRESH_SECRET` is unset.
    pub fn from_env() -> Self {
        Self {
            access_secret: env::var("JWT_ACCESS_SECRET").expect("JWT_ACCESS_SECRET must be set"),
            refresh_secret: env::var("JWT_REFRESH_SECRET").expect("JWT_REFRESH_SECRET must be set"),
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1800), // 30 minutes
            refresh_token_expiry: env::var("JWT_REFRESH_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(604800), // 7 days
        }
    }
}

// Secrets stay out of logs and `#[instrument]` output.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let config = JwtConfig {
            access_secret: "super-secret-access-key".to_string(),
            refresh_secret: "super-secret-refresh-key".to_string(),
            access_token_expiry: 1800,
            refresh_token_expiry: 604800,
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-access-key"));
        assert!(!rendered.contains("super-secret-refresh-key"));
        assert!(rendered.contains("1800"));
    }
}
