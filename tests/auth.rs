mod common;

use axum::http::StatusCode;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde_json::json;

use bus_ticketing_backend::entities::profile::{self, UserType};
use bus_ticketing_backend::entities::user;
use bus_ticketing_backend::utils::jwt::create_token;

use common::*;

#[tokio::test]
async fn registration_creates_inactive_customer_account() {
    let state = default_state().await;
    let app = app(state.clone());

    let (status, body) = send_json(
        &app,
        "POST",
        "/register",
        json!({
            "email": "asha@example.com",
            "password": "s3cure-pass",
            "first_name": "Asha",
            "last_name": "Shrestha",
            "phone_number": "+9779812345678"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "asha@example.com");
    // Login identifier doubles as the username
    assert_eq!(body["username"], "asha@example.com");

    let created = user::Entity::find()
        .filter(user::Column::Email.eq("asha@example.com"))
        .one(&state.db)
        .await
        .unwrap()
        .unwrap();
    assert!(!created.is_active);
    assert_eq!(created.full_name.as_deref(), Some("Asha Shrestha"));

    let created_profile = profile::Entity::find()
        .filter(profile::Column::UserId.eq(created.id))
        .one(&state.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created_profile.user_type, UserType::Customer);
}

#[tokio::test]
async fn duplicate_email_is_conflict_even_with_different_case() {
    let state = default_state().await;
    let app = app(state.clone());

    let register = |email: &str| {
        json!({
            "email": email,
            "password": "s3cure-pass",
            "first_name": "Asha",
            "last_name": "Shrestha"
        })
    };

    let (status, _) = send_json(&app, "POST", "/register", register("asha@example.com")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(&app, "POST", "/register", register("ASHA@example.com")).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn inactive_account_cannot_login() {
    let state = default_state().await;
    let app = app(state.clone());

    let (status, _) = send_json(
        &app,
        "POST",
        "/register",
        json!({
            "email": "asha@example.com",
            "password": "s3cure-pass"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(
        &app,
        "POST",
        "/login",
        json!({ "email": "asha@example.com", "password": "s3cure-pass" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("activate your account"));
}

async fn register_and_activate(
    app: &axum::Router,
    state: &bus_ticketing_backend::AppState,
    email: &str,
) -> user::Model {
    let (status, _) = send_json(
        app,
        "POST",
        "/register",
        json!({
            "email": email,
            "password": "s3cure-pass",
            "first_name": "Asha",
            "last_name": "Shrestha"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let found = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(&state.db)
        .await
        .unwrap()
        .unwrap();
    let mut active: user::ActiveModel = found.into();
    active.is_active = Set(true);
    active.update(&state.db).await.unwrap()
}

#[tokio::test]
async fn activated_account_logs_in_and_posts_feedback() {
    let state = default_state().await;
    let app = app(state.clone());

    register_and_activate(&app, &state, "asha@example.com").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/login",
        json!({ "email": "asha@example.com", "password": "s3cure-pass" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["email"], "asha@example.com");

    let (status, review) = send_json_with_token(
        &app,
        "POST",
        "/api/v1/feedback-reviews",
        &token,
        json!({ "title": "Great ride", "content": "Comfortable seats." }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(review["rating"], 5);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let state = default_state().await;
    let app = app(state.clone());

    register_and_activate(&app, &state, "asha@example.com").await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/login",
        json!({ "email": "asha@example.com", "password": "wrong" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn feedback_requires_authentication() {
    let state = default_state().await;
    let app = app(state);

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/v1/feedback-reviews",
        json!({ "title": "x", "content": "y" }),
    )
    .await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn feedback_updates_and_deletes_are_method_not_allowed() {
    let state = default_state().await;
    let app = app(state);

    let (status, _) = send_json(&app, "PUT", "/api/v1/feedback-reviews/1", json!({})).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = send_json(&app, "DELETE", "/api/v1/feedback-reviews/1", json!({})).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn fleet_management_requires_admin() {
    let state = default_state().await;
    let customer = seed_user(&state.db, "customer@example.com", true).await;
    seed_profile(&state.db, customer.id, UserType::Customer).await;
    let admin = seed_user(&state.db, "admin@example.com", true).await;
    seed_profile(&state.db, admin.id, UserType::Admin).await;
    let app = app(state.clone());

    let customer_token = create_token(
        customer.id,
        &customer.email,
        UserType::Customer,
        TEST_SECRET,
        1,
    )
    .unwrap();
    let admin_token =
        create_token(admin.id, &admin.email, UserType::Admin, TEST_SECRET, 1).unwrap();

    let payload = json!({ "bus_number": "BA-2-KHA-1234", "capacity": 40 });

    let (status, _) = send_json_with_token(
        &app,
        "POST",
        "/api/admin/buses",
        &customer_token,
        payload.clone(),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, bus) =
        send_json_with_token(&app, "POST", "/api/admin/buses", &admin_token, payload).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(bus["bus_number"], "BA-2-KHA-1234");
    assert_eq!(bus["bus_type"], "non_ac");
}
