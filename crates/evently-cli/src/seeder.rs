//! Fake data for local development.
//!
//! Seeded users share [`SEED_PASSWORD`] and live under [`SEED_DOMAIN`], which
//! is how [`clear_seed`] finds them again. Events are spread across the
//! seeded users and scheduled between one day and six months ahead.

use chrono::{DateTime, Duration, Utc};
use fake::Fake;
use fake::faker::address::en::CityName;
use fake::faker::lorem::en::{Paragraph, Words};
use fake::faker::name::en::FirstName;
use sqlx::SqlitePool;

use evently_auth::Role;
use evently_core::hash_password;

pub const SEED_DOMAIN: &str = "seed.evently.test";
pub const SEED_PASSWORD: &str = "password123";

#[derive(Debug, Clone, Copy)]
pub struct SeedConfig {
    pub users: usize,
    pub events: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            users: 10,
            events: 25,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub events: usize,
}

#[derive(Debug, Clone)]
pub struct GeneratedUser {
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct GeneratedEvent {
    pub name: String,
    pub description: String,
    pub location: String,
    pub date_time: DateTime<Utc>,
}

/// Pads with `filler` or truncates on a char boundary so that the result
/// holds between `min` and `max` characters.
fn fit(mut value: String, min: usize, max: usize, filler: &str) -> String {
    while value.chars().count() < min {
        value.push_str(filler);
    }
    if value.chars().count() > max {
        value = value.chars().take(max).collect::<String>().trim_end().to_string();
    }
    value
}

pub fn generate_users(count: usize) -> Vec<GeneratedUser> {
    let run = Utc::now().timestamp_millis();
    (0..count)
        .map(|i| {
            let first: String = FirstName().fake();
            let local: String = first
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            GeneratedUser {
                email: format!("{}.{}.{}@{}", local, run, i, SEED_DOMAIN),
            }
        })
        .collect()
}

pub fn generate_events(count: usize) -> Vec<GeneratedEvent> {
    (0..count)
        .map(|_| {
            let words: Vec<String> = Words(2..4).fake();
            let paragraph: String = Paragraph(1..3).fake();
            let city: String = CityName().fake();
            let days_ahead: i64 = (1..180).fake();
            let hour: i64 = (9..21).fake();

            GeneratedEvent {
                name: fit(format!("{} Meetup", words.join(" ")), 3, 100, " event"),
                description: fit(paragraph, 10, 500, " More details soon."),
                location: fit(city, 3, 100, " Hall"),
                date_time: Utc::now() + Duration::days(days_ahead) + Duration::hours(hour),
            }
        })
        .collect()
}

/// Inserts `config.users` users and `config.events` events owned by them.
///
/// Events need an owner, so no events are created when `config.users` is 0.
pub async fn seed(pool: &SqlitePool, config: SeedConfig) -> anyhow::Result<SeedSummary> {
    let password_hash = hash_password(SEED_PASSWORD).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let users = generate_users(config.users);
    let events = if users.is_empty() {
        Vec::new()
    } else {
        generate_events(config.events)
    };

    let mut tx = pool.begin().await?;
    let now = Utc::now();

    let mut user_ids = Vec::with_capacity(users.len());
    for user in &users {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (email, password_hash, role, created_at) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&user.email)
        .bind(&password_hash)
        .bind(Role::User)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;
        user_ids.push(id);
    }

    for event in &events {
        let owner = user_ids[(0..user_ids.len()).fake::<usize>()];
        sqlx::query(
            "INSERT INTO events (name, description, location, date_time, user_id, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&event.name)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.date_time)
        .bind(owner)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(SeedSummary {
        users: user_ids.len(),
        events: events.len(),
    })
}

/// Deletes every seeded user. Their events, registrations and refresh tokens
/// go with them through the foreign keys.
pub async fn clear_seed(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE email LIKE ?")
        .bind(format!("%@{}", SEED_DOMAIN))
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use evently_db::{init_memory_pool, run_migrations};
    use evently_models::{EventRequest, SignupRequest};
    use std::collections::HashSet;
    use validator::Validate;

    #[test]
    fn test_generated_users_are_unique_and_valid() {
        let users = generate_users(50);
        let emails: HashSet<_> = users.iter().map(|u| u.email.clone()).collect();
        assert_eq!(emails.len(), 50);

        for user in &users {
            let request = SignupRequest {
                email: user.email.clone(),
                password: SEED_PASSWORD.to_string(),
            };
            assert!(request.validate().is_ok(), "{}", user.email);
        }
    }

    #[test]
    fn test_generated_events_pass_validation() {
        for event in generate_events(50) {
            let request = EventRequest {
                name: event.name,
                description: event.description,
                location: event.location,
                date_time: event.date_time,
            };
            assert!(request.validate().is_ok(), "{:?}", request);
        }
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("ab".into(), 3, 10, "x"), "abx");
        assert_eq!(fit("abcdef".into(), 1, 3, "x"), "abc");
    }

    #[tokio::test]
    async fn test_seed_and_clear() {
        let pool = init_memory_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();

        let summary = seed(&pool, SeedConfig { users: 3, events: 5 }).await.unwrap();
        assert_eq!(summary, SeedSummary { users: 3, events: 5 });

        let events: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(events, 5);

        assert_eq!(clear_seed(&pool).await.unwrap(), 3);
        let events: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(events, 0);
    }

    #[tokio::test]
    async fn test_seed_without_users_creates_no_events() {
        let pool = init_memory_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();

        let summary = seed(&pool, SeedConfig { users: 0, events: 5 }).await.unwrap();
        assert_eq!(summary, SeedSummary::default());
    }
}
