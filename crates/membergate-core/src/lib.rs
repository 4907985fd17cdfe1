//! # Membergate Core
//!
//! Core types and utilities for the Membergate API.
//!
//! This crate provides the foundational pieces shared by the other
//! workspace crates:
//!
//! - [`errors`]: the HTTP-facing application error type with stable
//!   machine-readable codes
//! - [`password`]: bcrypt password hashing and verification
//! - [`pagination`]: pagination parameters and response metadata

pub mod errors;
pub mod pagination;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
