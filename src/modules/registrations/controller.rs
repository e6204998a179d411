use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use evently_core::AppError;
use evently_models::{MessageResponse, RegistrationResponse};

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::registrations::service::RegistrationService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/events/{id}/register",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 201, description = "Registered", body = RegistrationResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 409, description = "Already registered", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Registrations"
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id()))]
pub async fn register_for_event(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(event_id): Path<i64>,
) -> Result<(StatusCode, Json<RegistrationResponse>), AppError> {
    let registration =
        RegistrationService::register(&state.db, event_id, auth_user.user_id()).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            message: "successfully registered for event".to_string(),
            registration,
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}/register",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Registration cancelled", body = MessageResponse),
        (status = 400, description = "Not registered", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Registrations"
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id()))]
pub async fn cancel_registration(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(event_id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    RegistrationService::cancel(&state.db, event_id, auth_user.user_id()).await?;
    Ok(Json(MessageResponse::new(
        "registration cancelled successfully",
    )))
}
