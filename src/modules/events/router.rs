use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::events::controller::{
    create_event, delete_event, get_event, list_event_registrations, list_events, update_event,
};
use crate::modules::registrations::router::init_registrations_router;
use crate::state::AppState;

pub fn init_events_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_event).get(list_events))
        .route(
            "/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/{id}/registrations", get(list_event_registrations))
        .merge(init_registrations_router())
}
