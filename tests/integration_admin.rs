mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{
    body_json, create_test_event, create_test_user, json_request, login, send, setup_test_app,
};
use evently::evently_auth::Role;

#[tokio::test]
async fn test_admin_routes_reject_regular_users() {
    let app = setup_test_app().await;
    let user = create_test_user(&app.pool, Role::User).await;
    let tokens = login(&app, &user).await;

    let forbidden = send(
        &app,
        json_request("GET", "/api/admin/users", Some(&tokens.access_token), None),
    )
    .await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let unauthorized = send(&app, json_request("GET", "/api/admin/users", None, None)).await;
    assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_users() {
    let app = setup_test_app().await;
    let admin = create_test_user(&app.pool, Role::Admin).await;
    create_test_user(&app.pool, Role::User).await;
    let tokens = login(&app, &admin).await;

    let response = send(
        &app,
        json_request(
            "GET",
            "/api/admin/users?limit=1",
            Some(&tokens.access_token),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["meta"]["has_more"], true);
    assert!(body["data"][0].get("password_hash").is_none());
}

#[tokio::test]
async fn test_role_change_revokes_refresh_tokens() {
    let app = setup_test_app().await;
    let admin = create_test_user(&app.pool, Role::Admin).await;
    let user = create_test_user(&app.pool, Role::User).await;
    let admin_tokens = login(&app, &admin).await;
    let user_tokens = login(&app, &user).await;

    let response = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/admin/users/{}/role", user.id),
            Some(&admin_tokens.access_token),
            Some(json!({ "role": "admin" })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["role"], "admin");

    let refresh = send(
        &app,
        json_request(
            "POST",
            "/api/auth/refresh",
            None,
            Some(json!({ "refresh_token": user_tokens.refresh_token })),
        ),
    )
    .await;
    assert_eq!(refresh.status(), StatusCode::UNAUTHORIZED);

    let promoted = login(&app, &user).await;
    let admin_only = send(
        &app,
        json_request(
            "GET",
            "/api/admin/users",
            Some(&promoted.access_token),
            None,
        ),
    )
    .await;
    assert_eq!(admin_only.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_role_change_is_rolled_back_when_revocation_fails() {
    let app = setup_test_app().await;
    let admin = create_test_user(&app.pool, Role::Admin).await;
    let user = create_test_user(&app.pool, Role::User).await;
    let admin_tokens = login(&app, &admin).await;
    let user_tokens = login(&app, &user).await;

    sqlx::query(
        "CREATE TRIGGER block_revocation BEFORE DELETE ON refresh_tokens \
         BEGIN SELECT RAISE(ABORT, 'revocation blocked'); END",
    )
    .execute(&app.pool)
    .await
    .unwrap();

    let response = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/admin/users/{}/role", user.id),
            Some(&admin_tokens.access_token),
            Some(json!({ "role": "admin" })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let role: String = sqlx::query_scalar("SELECT role FROM users WHERE id = ?")
        .bind(user.id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(role, "user");

    sqlx::query("DROP TRIGGER block_revocation")
        .execute(&app.pool)
        .await
        .unwrap();

    let refresh = send(
        &app,
        json_request(
            "POST",
            "/api/auth/refresh",
            None,
            Some(json!({ "refresh_token": user_tokens.refresh_token })),
        ),
    )
    .await;
    assert_eq!(refresh.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_role_change_validation() {
    let app = setup_test_app().await;
    let admin = create_test_user(&app.pool, Role::Admin).await;
    let tokens = login(&app, &admin).await;

    let unknown_role = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/admin/users/{}/role", admin.id),
            Some(&tokens.access_token),
            Some(json!({ "role": "superuser" })),
        ),
    )
    .await;
    assert_eq!(unknown_role.status(), StatusCode::BAD_REQUEST);
    let message = body_json(unknown_role).await["error"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(message.starts_with("role: unknown variant `superuser`"), "{}", message);

    let no_role = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/admin/users/{}/role", admin.id),
            Some(&tokens.access_token),
            Some(json!({})),
        ),
    )
    .await;
    assert_eq!(no_role.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(no_role).await["error"], "role is required");

    let self_demotion = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/admin/users/{}/role", admin.id),
            Some(&tokens.access_token),
            Some(json!({ "role": "user" })),
        ),
    )
    .await;
    assert_eq!(self_demotion.status(), StatusCode::BAD_REQUEST);

    let missing = send(
        &app,
        json_request(
            "PATCH",
            "/api/admin/users/9999/role",
            Some(&tokens.access_token),
            Some(json!({ "role": "admin" })),
        ),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user_cascades() {
    let app = setup_test_app().await;
    let admin = create_test_user(&app.pool, Role::Admin).await;
    let user = create_test_user(&app.pool, Role::User).await;
    let admin_tokens = login(&app, &admin).await;
    let user_tokens = login(&app, &user).await;

    let event_id = create_test_event(&app, &user_tokens.access_token, "Doomed Meetup").await;

    let response = send(
        &app,
        json_request(
            "DELETE",
            &format!("/api/admin/users/{}", user.id),
            Some(&admin_tokens.access_token),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let event = send(
        &app,
        json_request("GET", &format!("/api/events/{}", event_id), None, None),
    )
    .await;
    assert_eq!(event.status(), StatusCode::NOT_FOUND);

    let tokens: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM refresh_tokens WHERE user_id = ?")
        .bind(user.id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(tokens, 0);

    let again = send(
        &app,
        json_request(
            "DELETE",
            &format!("/api/admin/users/{}", user.id),
            Some(&admin_tokens.access_token),
            None,
        ),
    )
    .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_cannot_delete_self() {
    let app = setup_test_app().await;
    let admin = create_test_user(&app.pool, Role::Admin).await;
    let tokens = login(&app, &admin).await;

    let response = send(
        &app,
        json_request(
            "DELETE",
            &format!("/api/admin/users/{}", admin.id),
            Some(&tokens.access_token),
            None,
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
