use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use evently_auth::Role;
use evently_core::{PaginationMeta, PaginationParams};
use evently_models::{
    Event, EventRequest, EventResponse, LoginRequest, LoginResponse, LogoutAllResponse,
    LogoutRequest, MessageResponse, PaginatedEventsResponse, PaginatedUsersResponse,
    RefreshTokenRequest, Registration, RegistrationResponse, RegistrationWithUser, SignupRequest,
    SignupResponse, SignupUser, UpdateRoleRequest, UserResponse,
};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::signup,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::logout_all,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::update_user_role,
        crate::modules::users::controller::delete_user,
        crate::modules::events::controller::list_events,
        crate::modules::events::controller::get_event,
        crate::modules::events::controller::create_event,
        crate::modules::events::controller::update_event,
        crate::modules::events::controller::delete_event,
        crate::modules::events::controller::list_event_registrations,
        crate::modules::registrations::controller::register_for_event,
        crate::modules::registrations::controller::cancel_registration,
    ),
    components(
        schemas(
            Role,
            SignupRequest,
            SignupResponse,
            SignupUser,
            LoginRequest,
            LoginResponse,
            RefreshTokenRequest,
            LogoutRequest,
            LogoutAllResponse,
            MessageResponse,
            UserResponse,
            UpdateRoleRequest,
            PaginatedUsersResponse,
            Event,
            EventRequest,
            EventResponse,
            PaginatedEventsResponse,
            Registration,
            RegistrationResponse,
            RegistrationWithUser,
            PaginationMeta,
            PaginationParams,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup, login, token refresh and logout"),
        (name = "Users", description = "Self-service user endpoints"),
        (name = "Admin", description = "Administrator user management"),
        (name = "Events", description = "Event management"),
        (name = "Registrations", description = "Event attendance")
    ),
    info(
        title = "Evently API",
        version = "0.1.0",
        description = "Event management REST API with JWT access tokens and rotating refresh tokens.",
        license(
            name = "MIT"
        )
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
            )
        }
    }
}
