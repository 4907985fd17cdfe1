use anyhow::anyhow;
use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, StatusCode, header};
use tracing::instrument;
use utoipa::ToSchema;

use membergate_auth::{AuthError, Principal, SessionTokens};
use membergate_core::AppError;

use super::model::{LoginRequest, Member, MessageResponse, SessionResponse, SignupRequest};
use super::service::{
    MemberService, bearer_header, expired_refresh_cookie, refresh_cookie,
    refresh_token_from_headers,
};
use crate::middleware::authn::CurrentMember;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub error: String,
}

type SessionReply = (StatusCode, [(HeaderName, String); 2], Json<SessionResponse>);

/// Both token carriers plus the identity body, shared by login and refresh.
fn session_reply(principal: Principal, tokens: &SessionTokens) -> SessionReply {
    (
        StatusCode::OK,
        [
            (header::AUTHORIZATION, bearer_header(&tokens.access_token)),
            (header::SET_COOKIE, refresh_cookie(&tokens.refresh_token)),
        ],
        Json(SessionResponse {
            member_id: principal.member_id,
            email: principal.email,
            role: principal.role,
        }),
    )
}

/// Register a new member
#[utoipa::path(
    post,
    path = "/members/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Member registered successfully", body = Member),
        (status = 400, description = "Email already registered or invalid body", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
    ),
    tag = "Members"
)]
#[instrument(skip(state, dto))]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<Member>), AppError> {
    let member = MemberService::signup(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// Login with email and password
///
/// On success the access token is returned in the `Authorization` response
/// header and the refresh token in the `RefreshToken` cookie. Any refresh
/// session the member already had is superseded.
#[utoipa::path(
    post,
    path = "/members/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = SessionResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
    ),
    tag = "Members"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<SessionReply, AppError> {
    let principal = MemberService::verify_credentials(&state.db, &dto.email, &dto.password).await?;
    let tokens = state
        .authenticator
        .start_session(&principal)
        .await
        .map_err(AuthError::into_app)?;

    Ok(session_reply(principal, &tokens))
}

/// Exchange the refresh token for a new token pair
///
/// The presented refresh token must be the one currently on record; a
/// stale or replayed token is rejected even if its signature and expiry
/// are fine. The record rotates on every successful call.
#[utoipa::path(
    post,
    path = "/members/refresh",
    responses(
        (status = 200, description = "Session refreshed", body = SessionResponse),
        (status = 401, description = "Missing, invalid, or superseded refresh token", body = ErrorResponse),
        (status = 503, description = "Refresh store unavailable, retry", body = ErrorResponse),
    ),
    tag = "Members"
)]
#[instrument(skip(state, headers))]
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<SessionReply, AppError> {
    let presented = refresh_token_from_headers(&headers)
        .ok_or_else(|| AppError::unauthorized(anyhow!("missing refresh token cookie")))?;

    let (principal, tokens) = state
        .authenticator
        .refresh_session(&presented)
        .await
        .map_err(AuthError::into_app)?;

    Ok(session_reply(principal, &tokens))
}

/// Logout and invalidate the refresh session
///
/// Drops the refresh record and clears the cookie. Safe to repeat; only a
/// store outage is reported as an error, so the client does not believe a
/// logout happened that the server never saw.
#[utoipa::path(
    post,
    path = "/members/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 503, description = "Refresh store unavailable, retry", body = ErrorResponse),
    ),
    tag = "Members"
)]
#[instrument(skip(state, headers))]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<([(HeaderName, String); 1], Json<MessageResponse>), AppError> {
    if let Some(presented) = refresh_token_from_headers(&headers) {
        match state.authenticator.end_session(&presented).await {
            Ok(()) => {}
            Err(e @ AuthError::Store(_)) => return Err(e.into_app()),
            // An unusable token has nothing left to revoke; clearing the
            // cookie is all that remains.
            Err(_) => {}
        }
    }

    Ok((
        [(header::SET_COOKIE, expired_refresh_cookie())],
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    ))
}

/// Current member identity from the access token
#[utoipa::path(
    get,
    path = "/members/me",
    responses(
        (status = 200, description = "Current member", body = SessionResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Members"
)]
#[instrument(skip(member))]
pub async fn me(member: CurrentMember) -> Json<SessionResponse> {
    Json(SessionResponse {
        member_id: member.0.member_id,
        email: member.0.email,
        role: member.0.role,
    })
}
