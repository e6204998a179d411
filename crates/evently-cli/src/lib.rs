//! # Evently CLI
//!
//! Administrative commands and database seeding for Evently.
//!
//! ```ignore
//! use evently_cli::admin::create_admin;
//! use evently_cli::seeder::{SeedConfig, seed};
//!
//! create_admin(&pool, "admin@example.com", "changeme").await?;
//! seed(&pool, SeedConfig { users: 20, events: 50 }).await?;
//! ```

pub mod admin;
pub mod seeder;
