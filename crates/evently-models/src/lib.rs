//! # Evently Models
//!
//! Database entities and request/response DTOs for the Evently API.
//!
//! - [`auth`]: signup, login, refresh and logout payloads
//! - [`users`]: user accounts and admin user management
//! - [`events`]: events and their create/update payload
//! - [`registrations`]: event attendance
//! - [`ownership`]: the [`OwnedResource`] trait used by owner-or-admin checks

pub mod auth;
pub mod events;
pub mod ownership;
pub mod registrations;
pub mod users;

pub use evently_auth::{Claims, Role};

pub use auth::{
    LoginRequest, LoginResponse, LogoutAllResponse, LogoutRequest, MessageResponse,
    RefreshTokenRequest, SignupRequest, SignupResponse, SignupUser,
};
pub use events::{Event, EventRequest, EventResponse, PaginatedEventsResponse};
pub use ownership::OwnedResource;
pub use registrations::{Registration, RegistrationResponse, RegistrationWithUser};
pub use users::{PaginatedUsersResponse, UpdateRoleRequest, User, UserResponse};
