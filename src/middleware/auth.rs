use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tracing::debug;

use evently_auth::{Claims, Role};
use evently_core::AppError;

use crate::state::AppState;

pub const MISSING_CREDENTIALS: &str = "Missing or malformed authorization header";
pub const INVALID_TOKEN: &str = "Invalid or expired token";

/// Extractor that validates the bearer access token and provides the caller's claims.
///
/// If `require_auth` already ran for this request the identity it stored in
/// the request extensions is reused instead of verifying the token twice.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> i64 {
        self.0.user_id
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::unauthorized(MISSING_CREDENTIALS))?;

        let claims = state
            .token_issuer
            .verify_access_token(bearer.token())
            .map_err(|e| {
                debug!(error = %e, "access token rejected");
                AppError::unauthorized(INVALID_TOKEN)
            })?;

        Ok(AuthUser(claims))
    }
}

/// Middleware that rejects unauthenticated requests and stores the verified
/// [`AuthUser`] in the request extensions for downstream handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    parts.extensions.insert(auth_user);

    Ok(next.run(Request::from_parts(parts, body)).await)
}
