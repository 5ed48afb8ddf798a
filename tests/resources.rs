mod common;

use axum::http::StatusCode;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::json;

use bus_ticketing_backend::entities::bus::{self, BusType};
use bus_ticketing_backend::entities::faq;

use common::*;

async fn seed_fleet(state: &bus_ticketing_backend::AppState) {
    for (number, bus_type, capacity, available) in [
        ("BA-1-PA-1111", BusType::Ac, 40, true),
        ("BA-2-KHA-2222", BusType::NonAc, 30, true),
        ("NA-3-GA-3333", BusType::Ac, 50, false),
    ] {
        bus::ActiveModel {
            bus_number: Set(number.to_string()),
            bus_type: Set(bus_type),
            capacity: Set(capacity),
            availability_status: Set(available),
            ..Default::default()
        }
        .insert(&state.db)
        .await
        .unwrap();
    }
}

#[tokio::test]
async fn buses_can_be_filtered_searched_and_ordered() {
    let state = default_state().await;
    seed_fleet(&state).await;
    let app = app(state);

    let (status, all) = get(&app, "/api/v1/buses").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, ac_only) = get(&app, "/api/v1/buses?bus_type=ac").await;
    assert_eq!(ac_only.as_array().unwrap().len(), 2);

    let (_, available) = get(&app, "/api/v1/buses?availability_status=true").await;
    assert_eq!(available.as_array().unwrap().len(), 2);

    let (_, searched) = get(&app, "/api/v1/buses?search=KHA").await;
    assert_eq!(searched.as_array().unwrap().len(), 1);
    assert_eq!(searched[0]["bus_number"], "BA-2-KHA-2222");

    let (_, ordered) = get(&app, "/api/v1/buses?ordering=-capacity").await;
    assert_eq!(ordered[0]["capacity"], 50);
    assert_eq!(ordered[2]["capacity"], 30);
}

#[tokio::test]
async fn routes_can_be_searched() {
    let state = default_state().await;
    seed_route(&state.db, "Kathmandu", "Pokhara").await;
    seed_route(&state.db, "Biratnagar", "Dharan").await;
    let app = app(state);

    let (status, found) = get(&app, "/api/v1/routes?search=Pokhara").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["start_location"], "Kathmandu");
}

#[tokio::test]
async fn bus_route_crud_round_trip() {
    let state = default_state().await;
    let bus = seed_bus(&state.db, "BA-2-KHA-1234", 40).await;
    let route = seed_route(&state.db, "Kathmandu", "Pokhara").await;
    let app = app(state);

    let (status, created) = send_json(
        &app,
        "POST",
        "/api/v1/bus-routes",
        json!({
            "bus": bus.id,
            "route": route.id,
            "date": tomorrow().to_string(),
            "available_seats": 40
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["bus"]["bus_number"], "BA-2-KHA-1234");
    let id = created["id"].as_i64().unwrap();

    let (status, listed) = get(&app, &format!("/api/v1/bus-routes?date={}", tomorrow())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/api/v1/bus-routes/{}", id),
        json!({ "available_seats": 25 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["available_seats"], 25);

    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/api/v1/bus-routes/{}", id),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, &format!("/api/v1/bus-routes/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bus_routes_can_be_filtered_by_bus_type_and_start_location() {
    let state = default_state().await;
    let ac_bus = seed_bus(&state.db, "BA-1-PA-1111", 40).await;
    let non_ac = bus::ActiveModel {
        bus_number: Set("BA-2-KHA-2222".to_string()),
        bus_type: Set(BusType::NonAc),
        capacity: Set(30),
        availability_status: Set(true),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .unwrap();
    let ktm_pokhara = seed_route(&state.db, "Kathmandu", "Pokhara").await;
    let brt_dharan = seed_route(&state.db, "Biratnagar", "Dharan").await;
    seed_bus_route(&state.db, ac_bus.id, ktm_pokhara.id, 40).await;
    seed_bus_route(&state.db, non_ac.id, brt_dharan.id, 30).await;
    let app = app(state);

    let (status, ac_only) = get(&app, "/api/v1/bus-routes?bus_type=ac").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ac_only.as_array().unwrap().len(), 1);
    assert_eq!(ac_only[0]["bus"]["bus_number"], "BA-1-PA-1111");

    let (status, from_biratnagar) =
        get(&app, "/api/v1/bus-routes?start_location=Biratnagar").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(from_biratnagar.as_array().unwrap().len(), 1);
    assert_eq!(from_biratnagar[0]["route"]["start_location"], "Biratnagar");
}

#[tokio::test]
async fn bus_route_referencing_unknown_bus_is_rejected() {
    let state = default_state().await;
    let route = seed_route(&state.db, "Kathmandu", "Pokhara").await;
    let app = app(state);

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/v1/bus-routes",
        json!({
            "bus": 999,
            "route": route.id,
            "date": tomorrow().to_string(),
            "available_seats": 40
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "bus");
}

#[tokio::test]
async fn faqs_are_listed() {
    let state = default_state().await;
    let now = chrono::Utc::now();
    faq::ActiveModel {
        question: Set("Can I cancel a booking?".to_string()),
        answer: Set("Yes, before the departure date.".to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .unwrap();
    let app = app(state);

    let (status, faqs) = get(&app, "/api/v1/faqs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(faqs.as_array().unwrap().len(), 1);

    let (status, single) = get(&app, "/api/v1/faqs/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(single["question"], "Can I cancel a booking?");
}

#[tokio::test]
async fn user_listing_never_exposes_credentials() {
    let state = default_state().await;
    seed_user(&state.db, "asha@example.com", true).await;
    let app = app(state);

    let (status, users) = get(&app, "/api/v1/users").await;
    assert_eq!(status, StatusCode::OK);

    let first = &users.as_array().unwrap()[0];
    assert_eq!(first["email"], "asha@example.com");
    assert!(first.get("password_hash").is_none());
}
