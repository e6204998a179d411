use axum::{Router, routing::post};

use crate::modules::registrations::controller::{cancel_registration, register_for_event};
use crate::state::AppState;

/// Attendance routes, merged into the events router.
pub fn init_registrations_router() -> Router<AppState> {
    Router::new().route(
        "/{id}/register",
        post(register_for_event).delete(cancel_registration),
    )
}
