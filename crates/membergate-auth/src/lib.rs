//! # Membergate Auth
//!
//! Authentication core for the Membergate API.
//!
//! This crate provides:
//!
//! - [`claims`]: claim structures for the two signed-token classes
//! - [`jwt`]: token creation and verification, keyed per class
//! - [`principal`]: the authenticated identity and the member-lookup seam
//! - [`authenticator`]: session issuance, refresh rotation, and logout
//! - [`error`]: the authentication failure taxonomy
//!
//! # Token Classes
//!
//! Two token classes share one algorithm (HMAC-SHA-256 compact JWS) but
//! are signed with independent secrets and validity windows:
//!
//! - **Access token** ([`AccessClaims`]): 30 minutes, authorizes
//!   individual requests via the `Authorization` header
//! - **Refresh token** ([`RefreshClaims`]): 7 days, exchanged for a new
//!   token pair and tracked server-side in the refresh store
//!
//! A compromised access secret cannot forge a refresh token, and vice
//! versa.
//!
//! # Example
//!
//! ```ignore
//! use membergate_auth::{create_access_token, verify_access_token};
//! use membergate_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//!
//! let token = create_access_token(member_id, "member@example.com", &config)?;
//! let claims = verify_access_token(&token, &config)?;
//! assert_eq!(claims.sub, "member@example.com");
//! ```

pub mod authenticator;
pub mod claims;
pub mod error;
pub mod jwt;
pub mod principal;

// Re-export commonly used types at crate root
pub use authenticator::{Authenticator, SessionTokens};
pub use claims::{AccessClaims, RefreshClaims, TokenClaims};
pub use error::AuthError;
pub use jwt::{
    create_access_token, create_refresh_token, verify_access_token, verify_refresh_token,
};
pub use principal::{Principal, PrincipalResolver, Role};
