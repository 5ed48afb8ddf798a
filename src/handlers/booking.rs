use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::entities::{booking, booking_book, booking_detail, bus, bus_route, route, user};
use crate::error::{AppError, AppResult};
use crate::handlers::bus::{expand_bus_route, BusRouteResponse};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct BookingItemRequest {
    pub bus_route: i32,
    pub seat_numbers: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub user: i32,
    pub book: Vec<BookingItemRequest>,
}

#[derive(Debug, Serialize)]
pub struct BookingDetailResponse {
    pub id: i32,
    pub bus_route: BusRouteResponse,
    pub seat_numbers: i32,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: i32,
    /// The booking user's login identifier (email)
    pub user: String,
    pub booking_time: DateTime<Utc>,
    pub book: Vec<BookingDetailResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    pub user: Option<i32>,
}

/// Insert the booking header, its line items and the links between them in
/// one transaction. A failure anywhere leaves no rows behind.
///
/// Seat counts are NOT checked against the instance's available_seats and
/// the counter is never decremented; see the pinned test in tests/booking.rs.
pub async fn compose_booking(
    db: &DatabaseConnection,
    user_id: i32,
    items: &[(i32, i32)],
) -> AppResult<booking::Model> {
    let items = items.to_vec();

    let booking = db
        .transaction::<_, booking::Model, AppError>(move |txn| {
            Box::pin(async move {
                let header = booking::ActiveModel {
                    user_id: Set(user_id),
                    booking_time: Set(Utc::now().into()),
                    ..Default::default()
                }
                .insert(txn)
                .await?;

                for (bus_route_id, seat_numbers) in items {
                    let detail = booking_detail::ActiveModel {
                        bus_route_id: Set(bus_route_id),
                        seat_numbers: Set(seat_numbers),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    booking_book::ActiveModel {
                        booking_id: Set(header.id),
                        booking_detail_id: Set(detail.id),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                }

                Ok(header)
            })
        })
        .await?;

    Ok(booking)
}

/// Create a booking with nested line items
pub async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    let user = user::Entity::find_by_id(payload.user)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Validation {
            field: "user".to_string(),
            message: format!("User {} does not exist", payload.user),
        })?;

    // Validate every item before anything is written
    let mut items = Vec::with_capacity(payload.book.len());
    for item in &payload.book {
        if item.seat_numbers < 1 {
            return Err(AppError::Validation {
                field: "book".to_string(),
                message: "seat_numbers must be a positive integer".to_string(),
            });
        }

        bus_route::Entity::find_by_id(item.bus_route)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::Validation {
                field: "book".to_string(),
                message: format!("Bus route {} does not exist", item.bus_route),
            })?;

        items.push((item.bus_route, item.seat_numbers));
    }

    let booking = compose_booking(&state.db, user.id, &items).await?;

    tracing::info!(
        booking_id = booking.id,
        user_id = user.id,
        items = items.len(),
        "Created booking"
    );

    // Confirmation mail goes out after the transaction committed; delivery
    // problems never affect the response.
    let mailer = state.mailer.clone();
    let (email, first_name) = (user.email.clone(), user.first_name.clone());
    tokio::spawn(async move {
        mailer.send_booking_confirmation(&email, &first_name).await;
    });

    let response = booking_response(&state, booking).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Compose the nested booking payload: header, line items in insertion
/// order, each with its bus-route instance expanded.
pub async fn booking_response(
    state: &AppState,
    booking: booking::Model,
) -> AppResult<BookingResponse> {
    let user = user::Entity::find_by_id(booking.user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Internal("Booking user not found".to_string()))?;

    let links = booking_book::Entity::find()
        .filter(booking_book::Column::BookingId.eq(booking.id))
        .order_by_asc(booking_book::Column::Id)
        .all(&state.db)
        .await?;

    let detail_ids: Vec<i32> = links.iter().map(|l| l.booking_detail_id).collect();
    let details = booking_detail::Entity::find()
        .filter(booking_detail::Column::Id.is_in(detail_ids.clone()))
        .all(&state.db)
        .await?;

    let instances = bus_route::Entity::find().all(&state.db).await?;
    let buses = bus::Entity::find().all(&state.db).await?;
    let routes = route::Entity::find().all(&state.db).await?;

    let mut book = Vec::with_capacity(detail_ids.len());
    for detail_id in detail_ids {
        let detail = details
            .iter()
            .find(|d| d.id == detail_id)
            .ok_or_else(|| AppError::Internal("Booking detail not found".to_string()))?;
        let instance = instances
            .iter()
            .find(|i| i.id == detail.bus_route_id)
            .ok_or_else(|| AppError::Internal("Bus route not found".to_string()))?;
        let bus = buses
            .iter()
            .find(|b| b.id == instance.bus_id)
            .ok_or_else(|| AppError::Internal("Bus not found".to_string()))?;
        let route = routes
            .iter()
            .find(|r| r.id == instance.route_id)
            .ok_or_else(|| AppError::Internal("Route not found".to_string()))?;

        book.push(BookingDetailResponse {
            id: detail.id,
            bus_route: BusRouteResponse::new(instance.clone(), bus.clone(), route.clone()),
            seat_numbers: detail.seat_numbers,
        });
    }

    Ok(BookingResponse {
        id: booking.id,
        user: user.email,
        booking_time: booking.booking_time.with_timezone(&Utc),
        book,
    })
}

/// List bookings, optionally filtered by user
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<ListBookingsQuery>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    let mut select = booking::Entity::find();

    if let Some(user_id) = query.user {
        select = select.filter(booking::Column::UserId.eq(user_id));
    }

    let bookings = select.order_by_asc(booking::Column::Id).all(&state.db).await?;

    let mut responses = Vec::with_capacity(bookings.len());
    for booking in bookings {
        responses.push(booking_response(&state, booking).await?);
    }

    Ok(Json(responses))
}

pub async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<i32>,
) -> AppResult<Json<BookingResponse>> {
    let booking = booking::Entity::find_by_id(booking_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    Ok(Json(booking_response(&state, booking).await?))
}

/// Delete a booking together with its links and line items
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let booking = booking::Entity::find_by_id(booking_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    let links = booking_book::Entity::find()
        .filter(booking_book::Column::BookingId.eq(booking.id))
        .all(&state.db)
        .await?;
    let detail_ids: Vec<i32> = links.iter().map(|l| l.booking_detail_id).collect();

    state
        .db
        .transaction::<_, (), AppError>(|txn| {
            Box::pin(async move {
                booking_book::Entity::delete_many()
                    .filter(booking_book::Column::BookingId.eq(booking.id))
                    .exec(txn)
                    .await?;
                booking_detail::Entity::delete_many()
                    .filter(booking_detail::Column::Id.is_in(detail_ids))
                    .exec(txn)
                    .await?;
                booking::Entity::delete_by_id(booking.id).exec(txn).await?;
                Ok(())
            })
        })
        .await?;

    Ok(Json(serde_json::json!({ "message": "Booking deleted" })))
}

// ============ Booking details (read-only) ============

pub async fn list_booking_details(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BookingDetailResponse>>> {
    let details = booking_detail::Entity::find()
        .order_by_asc(booking_detail::Column::Id)
        .all(&state.db)
        .await?;

    let instances = bus_route::Entity::find().all(&state.db).await?;
    let buses = bus::Entity::find().all(&state.db).await?;
    let routes = route::Entity::find().all(&state.db).await?;

    let responses: Vec<BookingDetailResponse> = details
        .into_iter()
        .filter_map(|detail| {
            let instance = instances.iter().find(|i| i.id == detail.bus_route_id)?;
            let bus = buses.iter().find(|b| b.id == instance.bus_id)?.clone();
            let route = routes.iter().find(|r| r.id == instance.route_id)?.clone();
            Some(BookingDetailResponse {
                id: detail.id,
                bus_route: BusRouteResponse::new(instance.clone(), bus, route),
                seat_numbers: detail.seat_numbers,
            })
        })
        .collect();

    Ok(Json(responses))
}

pub async fn get_booking_detail(
    State(state): State<AppState>,
    Path(detail_id): Path<i32>,
) -> AppResult<Json<BookingDetailResponse>> {
    let detail = booking_detail::Entity::find_by_id(detail_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking detail not found".to_string()))?;

    let instance = bus_route::Entity::find_by_id(detail.bus_route_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Internal("Bus route not found".to_string()))?;

    let expanded = expand_bus_route(&state, instance).await?;

    Ok(Json(BookingDetailResponse {
        id: detail.id,
        bus_route: expanded,
        seat_numbers: detail.seat_numbers,
    }))
}
