//! Member data models and DTOs.
//!
//! # Core Types
//!
//! - [`Member`] - the member entity as stored
//!
//! # Request DTOs
//!
//! - [`SignupRequest`] - register a new member
//! - [`LoginRequest`] - credential login
//!
//! # Response DTOs
//!
//! - [`SessionResponse`] - identity echoed back by login/refresh/me; the
//!   tokens themselves travel in the `Authorization` header and the
//!   `RefreshToken` cookie, never in the body
//! - [`PaginatedMembersResponse`] - admin listing page

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use membergate_auth::Role;
use membergate_core::PaginationMeta;

/// A member of the service.
///
/// The password hash never leaves the service layer; this struct is the
/// response-safe shape.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Member {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub pic: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// DTO for registering a new member.
///
/// Signup always creates an ordinary member; administrators are created
/// out-of-band (`create-admin`).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    /// Optional profile picture URL
    pub pic: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Identity of the session holder, returned by login, refresh, and `/me`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub member_id: i64,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// One page of the admin member listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedMembersResponse {
    pub data: Vec<Member>,
    pub meta: PaginationMeta,
}
