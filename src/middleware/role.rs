//! Role-based authorization.
//!
//! Two ways to require an administrator:
//! 1. Layer-based middleware with [`require_admin`]
//! 2. Extractor-based with [`RequireAdmin`]

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use evently_auth::Role;
use evently_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Fails with 403 unless `role` is one of `allowed_roles`.
pub fn check_role(role: Role, allowed_roles: &[Role]) -> Result<(), AppError> {
    if allowed_roles.contains(&role) {
        return Ok(());
    }
    Err(AppError::forbidden(
        "Access denied. Administrator privileges required.",
    ))
}

/// Middleware for admin-only routes.
///
/// ```rust,ignore
/// let admin_routes = Router::new()
///     .route("/users", get(list_users))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
/// ```
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    check_role(auth_user.role(), &[Role::Admin])?;
    parts.extensions.insert(auth_user);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Extractor for admin-only handlers. Wraps the authenticated admin.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        check_role(auth_user.role(), &[Role::Admin])?;

        Ok(RequireAdmin(auth_user))
    }
}
