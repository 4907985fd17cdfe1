//! Administrator console endpoints.
//!
//! Everything nested under `/manager` sits behind the admin role layer;
//! an authenticated ordinary member gets 403 here, never 401.

use axum::Json;
use axum::extract::{Query, State};
use tracing::instrument;

use membergate_core::{AppError, PaginationMeta, PaginationParams};

use crate::modules::members::model::PaginatedMembersResponse;
use crate::modules::members::service::MemberService;
use crate::state::AppState;

/// List members (admin only)
#[utoipa::path(
    get,
    path = "/manager/members",
    responses(
        (status = 200, description = "One page of members", body = PaginatedMembersResponse),
        (status = 401, description = "Not authenticated", body = crate::modules::members::controller::ErrorResponse),
        (status = 403, description = "Authenticated but not an administrator", body = crate::modules::members::controller::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Manager"
)]
#[instrument(skip(state, params))]
pub async fn list_members(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedMembersResponse>, AppError> {
    let limit = params.limit();
    let offset = params.offset();

    let data = MemberService::list(&state.db, limit, offset).await?;
    let total = MemberService::count(&state.db).await?;

    let meta = PaginationMeta {
        total,
        limit,
        offset: Some(offset),
        page: params.page(),
        has_more: offset + limit < total,
    };

    Ok(Json(PaginatedMembersResponse { data, meta }))
}
