#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;

use bus_ticketing_backend::entities::bus::{self, BusType};
use bus_ticketing_backend::entities::profile::{self, UserType};
use bus_ticketing_backend::entities::{bus_route, route, user};
use bus_ticketing_backend::routes;
use bus_ticketing_backend::utils::google::{GoogleClaims, TokenVerifier, VerifyError};
use bus_ticketing_backend::utils::mail::Mailer;
use bus_ticketing_backend::{AppState, Config};

pub const TEST_SECRET: &str = "test-secret";
pub const TEST_FRONTEND: &str = "http://frontend.test";
pub const TEST_AUDIENCE: &str = "test-client-id";

/// Canned token verifier: hands out fixed claims or rejects everything.
pub enum MockVerifier {
    Succeed(GoogleClaims),
    Fail,
}

#[async_trait]
impl TokenVerifier for MockVerifier {
    async fn verify(
        &self,
        _credential: &str,
        _audience: &str,
    ) -> Result<GoogleClaims, VerifyError> {
        match self {
            MockVerifier::Succeed(claims) => Ok(claims.clone()),
            MockVerifier::Fail => Err(VerifyError::InvalidToken("rejected".to_string())),
        }
    }
}

/// Mailer that records every dispatch instead of sending anything.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_booking_confirmation(&self, email: &str, first_name: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), first_name.to_string()));
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expiration_hours: 24,
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        google_oauth_client_id: TEST_AUDIENCE.to_string(),
        frontend_url: TEST_FRONTEND.to_string(),
    }
}

pub async fn test_db() -> DatabaseConnection {
    // A single pooled connection keeps the in-memory database alive across
    // queries.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub async fn test_state(
    verifier: Arc<dyn TokenVerifier>,
    mailer: Arc<dyn Mailer>,
) -> AppState {
    AppState {
        db: test_db().await,
        config: test_config(),
        verifier,
        mailer,
    }
}

pub async fn default_state() -> AppState {
    test_state(Arc::new(MockVerifier::Fail), Arc::new(RecordingMailer::default())).await
}

pub fn app(state: AppState) -> Router {
    routes::create_router(state)
}

pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Value,
) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

pub async fn send_json_with_token(
    app: &Router,
    method: &str,
    uri: &str,
    token: &str,
    body: Value,
) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

/// Raw response for requests where the test inspects headers or a
/// non-JSON body.
pub async fn send_form(app: &Router, method: &str, uri: &str, body: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&bytes).to_string()
}

// ============ Fixtures ============

pub async fn seed_user(db: &DatabaseConnection, email: &str, is_active: bool) -> user::Model {
    user::ActiveModel {
        email: Set(email.to_string()),
        username: Set(email.to_string()),
        first_name: Set("Test".to_string()),
        last_name: Set("User".to_string()),
        full_name: Set(Some("Test User".to_string())),
        is_active: Set(is_active),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed user")
}

pub async fn seed_profile(
    db: &DatabaseConnection,
    user_id: i32,
    user_type: UserType,
) -> profile::Model {
    profile::ActiveModel {
        user_id: Set(user_id),
        user_type: Set(user_type),
        phone_number: Set("+9779812345678".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed profile")
}

pub async fn seed_bus(db: &DatabaseConnection, bus_number: &str, capacity: i32) -> bus::Model {
    bus::ActiveModel {
        bus_number: Set(bus_number.to_string()),
        bus_type: Set(BusType::Ac),
        capacity: Set(capacity),
        availability_status: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed bus")
}

pub async fn seed_route(db: &DatabaseConnection, start: &str, end: &str) -> route::Model {
    route::ActiveModel {
        start_location: Set(start.to_string()),
        end_location: Set(end.to_string()),
        stops: Set("Mugling,Kurintar".to_string()),
        scheduled_time: Set(NaiveTime::from_hms_opt(7, 30, 0).unwrap()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed route")
}

pub async fn seed_bus_route(
    db: &DatabaseConnection,
    bus_id: i32,
    route_id: i32,
    available_seats: i32,
) -> bus_route::Model {
    bus_route::ActiveModel {
        bus_id: Set(bus_id),
        route_id: Set(route_id),
        date: Set(tomorrow()),
        available_seats: Set(available_seats),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed bus route")
}

pub fn tomorrow() -> NaiveDate {
    Utc::now().date_naive() + chrono::Duration::days(1)
}
