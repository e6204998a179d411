//! # Evently API
//!
//! An event management REST API built with Axum and SQLite. Users sign up,
//! log in, create and browse events, and register for them.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # AuthUser extractor, admin and owner-or-admin checks
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Signup, login, refresh rotation, logout
//! │   ├── users/       # Profile and admin user management
//! │   ├── events/      # Event CRUD
//! │   └── registrations/ # Event attendance
//! ├── docs.rs           # OpenAPI document
//! ├── logging.rs        # Tracing setup and request logging
//! ├── router.rs         # Route tree
//! └── state.rs          # Shared application state
//! ```
//!
//! Each feature module has a `controller.rs` (HTTP handlers), a `service.rs`
//! (queries and business rules) and a `router.rs`. Entities and DTOs live in
//! the `evently-models` crate.
//!
//! ## Authentication
//!
//! - **Access token**: HS256 JWT, 15 minutes by default, sent as `Authorization: Bearer`.
//! - **Refresh token**: 32 random bytes, hex-encoded, 7 days by default. Stored
//!   hashed, single-use, rotated on every refresh.
//!
//! Roles are `user` and `admin`. Events can be changed only by their owner or
//! an admin. Admins are created with `evently-cli create-admin`.
//!
//! ## Environment Variables
//!
//! ```bash
//! DATABASE_URL=sqlite://evently.db?mode=rwc
//! JWT_SECRET=your-secure-secret-key
//! JWT_ACCESS_EXPIRY=15m
//! JWT_REFRESH_EXPIRY=168h
//! PORT=8080
//! ```

pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use evently_auth;
pub use evently_config;
pub use evently_core;
pub use evently_db;
pub use evently_models;
