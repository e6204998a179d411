use axum::{
    Router,
    routing::{delete, get, patch},
};

use crate::modules::users::controller::{delete_user, get_profile, list_users, update_user_role};
use crate::state::AppState;

/// Self-service routes, nested under `/users` behind `require_auth`.
pub fn init_users_router() -> Router<AppState> {
    Router::new().route("/me", get(get_profile))
}

/// Admin user management, nested under `/admin/users` behind `require_admin`.
pub fn init_admin_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/{id}/role", patch(update_user_role))
        .route("/{id}", delete(delete_user))
}
