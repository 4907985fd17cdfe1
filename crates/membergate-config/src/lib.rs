//! # Membergate Config
//!
//! Configuration types for the Membergate API, loaded from environment
//! variables at startup and immutable afterwards:
//!
//! - [`jwt`]: signing secrets and validity windows for the two token classes
//! - [`cors`]: allowed CORS origins
//! - [`redis`]: refresh-token store connection settings
//! - [`rate_limit`]: per-IP rate limiting buckets
//!
//! # Example
//!
//! ```ignore
//! use membergate_config::{CorsConfig, JwtConfig, RedisConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let redis_config = RedisConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod rate_limit;
pub mod redis;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
pub use redis::RedisConfig;
