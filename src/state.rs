//! Shared application state.
//!
//! Everything here is constructed once at startup and read-only afterwards
//! (the pool and the store manage their own interior connections), so the
//! state clones freely across request tasks.

use std::sync::Arc;

use sqlx::PgPool;

use membergate_auth::Authenticator;
use membergate_config::{CorsConfig, JwtConfig, RateLimitConfig, RedisConfig};
use membergate_store::RedisRefreshStore;

use crate::db::init_db_pool;
use crate::modules::members::service::PgPrincipalResolver;

/// The production authenticator: Postgres-backed member lookup over a
/// Redis refresh store.
pub type AppAuthenticator = Authenticator<PgPrincipalResolver, RedisRefreshStore>;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub authenticator: Arc<AppAuthenticator>,
}

pub async fn init_app_state() -> AppState {
    let db = init_db_pool().await;
    let jwt_config = JwtConfig::from_env();
    let redis_config = RedisConfig::from_env();

    let store = RedisRefreshStore::new(&redis_config.url, redis_config.op_timeout)
        .await
        .expect("Failed to connect to refresh-token store");

    let authenticator = Arc::new(Authenticator::new(
        PgPrincipalResolver::new(db.clone()),
        store,
        jwt_config.clone(),
    ));

    AppState {
        db,
        jwt_config,
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::from_env(),
        authenticator,
    }
}
