//! JWT claim structures for access tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::role::Role;

/// JWT claims for access tokens.
///
/// Everything the authorization layer needs is carried in the token, so
/// protected requests never touch the database to identify the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User's email address
    pub email: String,
    /// User ID
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// User's role at the time the token was issued
    pub role: Role,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: i64,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
