use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Per-IP rate limit configuration.
///
/// Every mutating endpoint this service exposes is credential-shaped
/// (signup, login, refresh), so one strict bucket covers the app.
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    /// Sustained requests per second per peer
    pub per_second: u64,
    /// Burst size per peer
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: 10,
            burst_size: 5,
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        Self {
            per_second: std::env::var("RATE_LIMIT_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            burst_size: std::env::var("RATE_LIMIT_BURST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }

    /// Create the GovernorConfig applied in front of the router.
    ///
    /// Keyed by peer IP, so the serve path must attach connect info.
    pub fn governor_config(
        &self,
    ) -> GovernorConfig<PeerIpKeyExtractor, ::governor::middleware::NoOpMiddleware> {
        GovernorConfigBuilder::default()
            .per_second(self.per_second)
            .burst_size(self.burst_size)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("Failed to build rate limiter config")
    }
}
