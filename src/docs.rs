use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use membergate_auth::Role;
use membergate_core::pagination::{PaginationMeta, PaginationParams};

use crate::modules::members::controller::ErrorResponse;
use crate::modules::members::model::{
    LoginRequest, Member, MessageResponse, PaginatedMembersResponse, SessionResponse,
    SignupRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::members::controller::signup,
        crate::modules::members::controller::login,
        crate::modules::members::controller::refresh,
        crate::modules::members::controller::logout,
        crate::modules::members::controller::me,
        crate::modules::manager::controller::list_members,
    ),
    components(
        schemas(
            Member,
            SignupRequest,
            LoginRequest,
            SessionResponse,
            MessageResponse,
            PaginatedMembersResponse,
            ErrorResponse,
            Role,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Members", description = "Signup, login, and session lifecycle"),
        (name = "Manager", description = "Administrator-only operations"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
