pub mod auth;
pub mod ownership;
pub mod role;
