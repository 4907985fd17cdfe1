//! Refresh-token store connection settings.

use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct RedisConfig {
    /// Redis connection URL
    pub url: String,
    /// Upper bound applied to every store operation; a slow store fails the
    /// request with a retryable error instead of hanging it.
    pub op_timeout: Duration,
}

impl RedisConfig {
    pub fn from_env() -> Self {
        Self {
            url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            op_timeout: Duration::from_millis(
                env::var("REDIS_OP_TIMEOUT_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2000),
            ),
        }
    }
}
