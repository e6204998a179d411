use tracing::error;

use evently_core::AppError;
use evently_models::OwnedResource;

use crate::middleware::auth::AuthUser;

/// Permits the resource's owner or any admin; everyone else gets 403.
///
/// A resource that cannot name its owner is a server fault (500), checked
/// before the admin bypass.
pub fn require_owner_or_admin<R>(auth_user: &AuthUser, resource: &R) -> Result<(), AppError>
where
    R: OwnedResource + ?Sized,
{
    let Some(owner_id) = resource.owner_id() else {
        error!(
            user_id = auth_user.user_id(),
            "ownership check on a resource without an owner"
        );
        return Err(AppError::internal_error("resource owner is unknown"));
    };

    if auth_user.is_admin() || auth_user.user_id() == owner_id {
        return Ok(());
    }

    Err(AppError::forbidden(
        "You are not authorized to modify this resource",
    ))
}
