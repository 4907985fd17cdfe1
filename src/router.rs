use axum::http::{HeaderValue, Method};
use axum::{Router, middleware, routing::get};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::authn::authenticate_request;
use crate::middleware::role::require_admin;
use crate::modules::manager::router::init_manager_router;
use crate::modules::members::router::init_members_router;
use crate::state::AppState;

async fn health() -> &'static str {
    "OK"
}

/// Builds the route tree.
///
/// The per-IP rate limiter is not part of this router: it needs peer
/// connect info, which only the real serve path has, so `main` layers it
/// on top. The authentication filter, role gate, CORS, and request
/// logging all live here and are exercised by the in-process tests.
pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/health", get(health))
        .nest("/members", init_members_router())
        .nest(
            "/manager",
            init_manager_router().route_layer(middleware::from_fn(require_admin)),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate_request,
        ))
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .expose_headers([axum::http::header::AUTHORIZATION])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
