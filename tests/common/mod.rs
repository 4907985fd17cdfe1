use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use membergate::modules::members::service::PgPrincipalResolver;
use membergate::router::init_router;
use membergate::state::AppState;
use membergate_auth::Authenticator;
use membergate_config::{CorsConfig, JwtConfig, RateLimitConfig, RedisConfig};
use membergate_core::hash_password;
use membergate_store::RedisRefreshStore;

/// Fixed test secrets so the suite never depends on deployment env vars.
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        access_secret: "integration-test-access-secret-key".to_string(),
        refresh_secret: "integration-test-refresh-secret-key".to_string(),
        access_token_expiry: 1800,
        refresh_token_expiry: 604800,
    }
}

/// Member ids are randomized so concurrent tests sharing one Redis
/// instance never land on the same refresh-record key.
pub fn random_member_id() -> i64 {
    (Uuid::new_v4().as_u128() % 9_000_000_000) as i64 + 1_000
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Inserts a member directly. `role` is "user" or "admin".
pub async fn create_test_member(pool: &PgPool, email: &str, password: &str, role: &str) -> i64 {
    let hashed = hash_password(password).unwrap();
    let id = random_member_id();

    sqlx::query("INSERT INTO members (id, email, password, role) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(email)
        .bind(&hashed)
        .bind(role)
        .execute(pool)
        .await
        .unwrap();

    id
}

pub async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();

    let jwt_config = test_jwt_config();
    let redis_config = RedisConfig::from_env();
    let store = RedisRefreshStore::new(&redis_config.url, redis_config.op_timeout)
        .await
        .expect("integration tests require a reachable Redis (REDIS_URL)");

    let authenticator = Arc::new(Authenticator::new(
        PgPrincipalResolver::new(pool.clone()),
        store,
        jwt_config.clone(),
    ));

    let state = AppState {
        db: pool,
        jwt_config,
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::from_env(),
        authenticator,
    };

    init_router(state)
}
