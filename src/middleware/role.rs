//! Role gate for the administrator subtree.
//!
//! Runs after the authentication filter and reads its result. The split
//! matters: an anonymous caller gets 401, an authenticated member without
//! the role gets 403. A 403 never ends the member's session.

use anyhow::anyhow;
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use membergate_auth::Role;
use membergate_core::AppError;

use crate::middleware::authn::CurrentMember;

/// Layer for routes that require the admin role.
///
/// # Usage
///
/// ```rust,ignore
/// Router::new()
///     .nest("/manager", init_manager_router()
///         .route_layer(middleware::from_fn(require_admin)))
/// ```
pub async fn require_admin(req: Request, next: Next) -> Response {
    match check_role(req.extensions().get::<CurrentMember>(), Role::Admin) {
        Ok(()) => next.run(req).await,
        Err(e) => e.into_response(),
    }
}

/// Checks the authenticated member against a required role.
///
/// `None` means the authentication filter put no principal on the request:
/// the unauthenticated outcome. A present principal with an insufficient
/// role is the forbidden outcome.
pub fn check_role(member: Option<&CurrentMember>, required: Role) -> Result<(), AppError> {
    let member =
        member.ok_or_else(|| AppError::unauthorized(anyhow!("authentication required")))?;

    if !member.0.role.satisfies(required) {
        return Err(AppError::forbidden(anyhow!(
            "Access denied. Required role: {}",
            required
        )));
    }

    Ok(())
}
