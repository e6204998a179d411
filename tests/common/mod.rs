#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tower::ServiceExt;
use uuid::Uuid;

use evently::evently_auth::Role;
use evently::evently_config::{CorsConfig, JwtConfig};
use evently::evently_db::{init_memory_pool, run_migrations};
use evently::router::init_router;
use evently::state::AppState;

pub const TEST_PASSWORD: &str = "testpass123";

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub password: String,
}

pub struct Tokens {
    pub access_token: String,
    pub refresh_token: String,
}

pub fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-at-least-32-characters-long".to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 604800,
    }
}

pub async fn setup_test_app() -> TestApp {
    let pool = init_memory_pool().await.unwrap();
    run_migrations(&pool).await.unwrap();

    let state = AppState::new(
        pool.clone(),
        get_test_jwt_config(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    );

    TestApp {
        router: init_router(state),
        pool,
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Inserts a user directly, hashed at the minimum bcrypt cost.
pub async fn create_test_user(pool: &SqlitePool, role: Role) -> TestUser {
    let email = generate_unique_email();
    let hashed = bcrypt::hash(TEST_PASSWORD, 4).unwrap();

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (email, password_hash, role, created_at) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(&email)
    .bind(&hashed)
    .bind(role)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email,
        password: TEST_PASSWORD.to_string(),
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &TestApp, request: Request<Body>) -> Response {
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub async fn login(app: &TestApp, user: &TestUser) -> Tokens {
    let response = send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": user.email, "password": user.password })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    Tokens {
        access_token: body["access_token"].as_str().unwrap().to_string(),
        refresh_token: body["refresh_token"].as_str().unwrap().to_string(),
    }
}

pub fn event_body(name: &str) -> Value {
    json!({
        "name": name,
        "description": "An evening of talks and pizza",
        "location": "Main Hall",
        "date_time": (Utc::now() + Duration::days(30)).to_rfc3339(),
    })
}

/// Creates an event through the API and returns its id.
pub async fn create_test_event(app: &TestApp, token: &str, name: &str) -> i64 {
    let response = send(
        app,
        json_request("POST", "/api/events", Some(token), Some(event_body(name))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    body_json(response).await["event"]["id"].as_i64().unwrap()
}
