use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use tracing::instrument;

use evently_core::{AppError, PaginationMeta, PaginationParams};
use evently_models::{
    Event, EventRequest, EventResponse, MessageResponse, PaginatedEventsResponse,
    RegistrationWithUser,
};

use crate::middleware::auth::AuthUser;
use crate::middleware::ownership::require_owner_or_admin;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::events::service::EventService;
use crate::modules::registrations::service::RegistrationService;
use crate::modules::users::controller::pagination_from_query;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/events",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated events", body = PaginatedEventsResponse),
        (status = 400, description = "Invalid pagination", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Events"
)]
#[instrument(skip(state, query))]
pub async fn list_events(
    State(state): State<AppState>,
    query: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<PaginatedEventsResponse>, AppError> {
    let params = pagination_from_query(query)?;
    let (events, total) = EventService::list_events(&state.db, &params).await?;

    Ok(Json(PaginatedEventsResponse {
        data: events,
        meta: PaginationMeta::new(total, &params),
    }))
}

#[utoipa::path(
    get,
    path = "/api/events/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event details", body = Event),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    tag = "Events"
)]
#[instrument(skip(state))]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Event>, AppError> {
    let event = EventService::get_event(&state.db, id).await?;
    Ok(Json(event))
}

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = EventRequest,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Events"
)]
#[instrument(skip(state, auth_user, dto), fields(user_id = auth_user.user_id()))]
pub async fn create_event(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<EventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), AppError> {
    let event = EventService::create_event(&state.db, auth_user.user_id(), dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(EventResponse {
            message: "Event created".to_string(),
            event,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/events/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    request_body = EventRequest,
    responses(
        (status = 200, description = "Event updated", body = EventResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the owner or an admin", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Events"
)]
#[instrument(skip(state, auth_user, dto), fields(user_id = auth_user.user_id()))]
pub async fn update_event(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<EventRequest>,
) -> Result<Json<EventResponse>, AppError> {
    let existing = EventService::get_event(&state.db, id).await?;
    require_owner_or_admin(&auth_user, &existing)?;

    let event = EventService::update_event(&state.db, id, dto).await?;

    Ok(Json(EventResponse {
        message: "Event updated successfully".to_string(),
        event,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the owner or an admin", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Events"
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id()))]
pub async fn delete_event(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let existing = EventService::get_event(&state.db, id).await?;
    require_owner_or_admin(&auth_user, &existing)?;

    EventService::delete_event(&state.db, id).await?;
    Ok(Json(MessageResponse::new("Event deleted successfully")))
}

#[utoipa::path(
    get,
    path = "/api/events/{id}/registrations",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Attendees of the event", body = [RegistrationWithUser]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the owner or an admin", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Events"
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id()))]
pub async fn list_event_registrations(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Vec<RegistrationWithUser>>, AppError> {
    let event = EventService::get_event(&state.db, id).await?;
    require_owner_or_admin(&auth_user, &event)?;

    let registrations = RegistrationService::list_for_event(&state.db, event.id).await?;
    Ok(Json(registrations))
}
