//! Per-request authentication filter.
//!
//! One pass per request: public-path check, token extraction, verification
//! plus principal resolution, context population. The decision is made
//! here exactly once; handlers and the role layer only read the result
//! from the request extensions.

use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, Method, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

use membergate_auth::Principal;
use membergate_core::AppError;

use crate::state::AppState;

/// Paths that never require authentication.
const PUBLIC_PATHS: &[&str] = &[
    "/",
    "/index.html",
    "/error",
    "/health",
    "/members/signup",
    "/members/login",
    "/members/refresh",
    "/members/logout",
];

/// API documentation UI, public as well.
const PUBLIC_PREFIXES: &[&str] = &["/swagger-ui", "/api-docs", "/scalar"];

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path) || PUBLIC_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// CORS pre-flight requests skip authentication regardless of path.
pub fn is_preflight(method: &Method, headers: &HeaderMap) -> bool {
    method == Method::OPTIONS
        && headers.contains_key(header::ORIGIN)
        && headers.contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// The authenticated principal for the current request.
///
/// Inserted by [`authenticate_request`], valid for this request only. As
/// an extractor it is the unauthenticated entry point: handlers that take
/// it reject anonymous requests with 401.
#[derive(Debug, Clone)]
pub struct CurrentMember(pub Principal);

impl CurrentMember {
    pub fn member_id(&self) -> i64 {
        self.0.member_id
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin()
    }
}

impl<S> FromRequestParts<S> for CurrentMember
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentMember>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized(anyhow!("authentication required")))
    }
}

/// The authentication filter applied to the whole router.
///
/// A missing token is not an error here, since the target may be happy
/// with an anonymous caller. A token that is present but unusable always
/// is: it terminates the request with 401 before routing.
pub async fn authenticate_request(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    if is_preflight(req.method(), req.headers()) || is_public_path(req.uri().path()) {
        return next.run(req).await;
    }

    let Some(token) = bearer_token(req.headers()).map(str::to_owned) else {
        return next.run(req).await;
    };

    let claims = match state.authenticator.verify_access(&token) {
        Ok(claims) => claims,
        Err(e) => return e.into_app().into_response(),
    };

    let principal = match state.authenticator.authenticate(&claims).await {
        Ok(principal) => principal,
        Err(e) => return e.into_app().into_response(),
    };

    req.extensions_mut().insert(CurrentMember(principal));
    next.run(req).await
}
