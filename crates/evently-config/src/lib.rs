//! # Evently Config
//!
//! Configuration types for the Evently API, loaded from environment variables:
//!
//! - [`jwt`]: access/refresh token secret and lifetimes
//! - [`database`]: connection string and pool size
//! - [`server`]: bind address and background task intervals
//! - [`cors`]: allowed origins
//!
//! # Example
//!
//! ```ignore
//! use evently_config::{JwtConfig, ServerConfig};
//!
//! dotenvy::dotenv().ok();
//! let jwt_config = JwtConfig::from_env();
//! jwt_config.require_secret()?;
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod duration;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use duration::parse_duration_secs;
pub use jwt::{ConfigError, JwtConfig};
pub use server::ServerConfig;
