use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::json;

use evently::evently_auth::{Role, TokenError, TokenIssuer};
use evently::evently_config::JwtConfig;

const SECRET: &str = "test-secret-key-at-least-32-characters-long";

/// `{"alg":"none","typ":"JWT"}`
const NONE_HEADER: &str = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0";
/// `{"email":"mallory@example.com","userId":1,"role":"admin","exp":9999999999,"iat":0}`
const ADMIN_PAYLOAD: &str = "eyJlbWFpbCI6Im1hbGxvcnlAZXhhbXBsZS5jb20iLCJ1c2VySWQiOjEsInJvbGUiOiJhZG1pbiIsImV4cCI6OTk5OTk5OTk5OSwiaWF0IjowfQ";

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: SECRET.to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 604800,
    }
}

#[test]
fn test_claims_round_trip_for_every_role() {
    let issuer = TokenIssuer::new(get_test_jwt_config());

    for role in [Role::User, Role::Admin] {
        let token = issuer.issue_access_token("test@example.com", 7, role).unwrap();
        let claims = issuer.verify_access_token(&token).unwrap();

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.role, role);
    }
}

#[test]
fn test_claims_wire_format() {
    let issuer = TokenIssuer::new(get_test_jwt_config());
    let token = issuer
        .issue_access_token("test@example.com", 7, Role::Admin)
        .unwrap();
    let claims = issuer.verify_access_token(&token).unwrap();

    let value = serde_json::to_value(&claims).unwrap();
    assert_eq!(value["userId"], 7);
    assert_eq!(value["role"], "admin");
    assert!(value.get("user_id").is_none());
}

#[test]
fn test_alg_none_is_rejected() {
    let issuer = TokenIssuer::new(get_test_jwt_config());

    let unsigned = format!("{}.{}.", NONE_HEADER, ADMIN_PAYLOAD);
    assert_eq!(issuer.verify_access_token(&unsigned), Err(TokenError::Invalid));
}

#[test]
fn test_header_swap_is_rejected() {
    let issuer = TokenIssuer::new(get_test_jwt_config());
    let token = issuer
        .issue_access_token("test@example.com", 1, Role::User)
        .unwrap();

    let parts: Vec<&str> = token.split('.').collect();
    let swapped = format!("{}.{}.{}", NONE_HEADER, parts[1], parts[2]);
    assert_eq!(issuer.verify_access_token(&swapped), Err(TokenError::Invalid));
}

#[test]
fn test_other_hmac_algorithm_is_rejected() {
    let issuer = TokenIssuer::new(get_test_jwt_config());
    let now = Utc::now().timestamp();
    let claims = json!({
        "email": "test@example.com",
        "userId": 1,
        "role": "user",
        "exp": now + 900,
        "iat": now,
    });

    let token = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert_eq!(issuer.verify_access_token(&token), Err(TokenError::Invalid));
}

#[test]
fn test_missing_exp_is_rejected() {
    let issuer = TokenIssuer::new(get_test_jwt_config());
    let claims = json!({
        "email": "test@example.com",
        "userId": 1,
        "role": "user",
        "iat": Utc::now().timestamp(),
    });

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert_eq!(issuer.verify_access_token(&token), Err(TokenError::Invalid));
}

#[test]
fn test_expired_token_without_leeway() {
    let issuer = TokenIssuer::new(JwtConfig {
        access_token_expiry: -1,
        ..get_test_jwt_config()
    });
    let token = issuer
        .issue_access_token("test@example.com", 1, Role::User)
        .unwrap();

    assert_eq!(issuer.verify_access_token(&token), Err(TokenError::Expired));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let issuer = TokenIssuer::new(get_test_jwt_config());
    let token = issuer
        .issue_access_token("test@example.com", 1, Role::User)
        .unwrap();

    let other = TokenIssuer::new(JwtConfig::new("another-secret-key-at-least-32-chars"));
    assert_eq!(other.verify_access_token(&token), Err(TokenError::Invalid));
}

#[test]
fn test_refresh_tokens_are_unique() {
    let issuer = TokenIssuer::new(get_test_jwt_config());
    let a = issuer.issue_refresh_token().unwrap();
    let b = issuer.issue_refresh_token().unwrap();

    assert_ne!(a, b);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
}
