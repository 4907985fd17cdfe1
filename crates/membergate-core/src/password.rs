//! Password hashing and verification.
//!
//! Signup stores only bcrypt hashes; login verifies the presented password
//! against the stored hash.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow::anyhow!("failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed: &str) -> Result<bool, AppError> {
    verify(password, hashed)
        .map_err(|e| AppError::internal(anyhow::anyhow!("failed to verify password: {}", e)))
}
