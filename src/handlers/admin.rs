use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::Deserialize;

use crate::entities::bus::{self, BusType};
use crate::entities::route;
use crate::error::{AppError, AppResult};
use crate::AppState;

// ============ Bus management ============

#[derive(Debug, Deserialize)]
pub struct CreateBusRequest {
    pub bus_number: String,
    #[serde(default = "default_bus_type")]
    pub bus_type: BusType,
    pub capacity: i32,
    #[serde(default = "default_availability")]
    pub availability_status: bool,
}

fn default_bus_type() -> BusType {
    BusType::NonAc
}

fn default_availability() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct UpdateBusRequest {
    pub bus_number: Option<String>,
    pub bus_type: Option<BusType>,
    pub capacity: Option<i32>,
    pub availability_status: Option<bool>,
}

/// Register a bus in the fleet (admin)
pub async fn create_bus(
    State(state): State<AppState>,
    Json(payload): Json<CreateBusRequest>,
) -> AppResult<(StatusCode, Json<bus::Model>)> {
    if payload.capacity < 1 {
        return Err(AppError::Validation {
            field: "capacity".to_string(),
            message: "Capacity must be a positive integer".to_string(),
        });
    }

    let taken = bus::Entity::find()
        .filter(bus::Column::BusNumber.eq(&payload.bus_number))
        .one(&state.db)
        .await?;

    if taken.is_some() {
        return Err(AppError::Conflict(format!(
            "Bus number {} is already registered",
            payload.bus_number
        )));
    }

    let created = bus::ActiveModel {
        bus_number: Set(payload.bus_number),
        bus_type: Set(payload.bus_type),
        capacity: Set(payload.capacity),
        availability_status: Set(payload.availability_status),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a bus (admin)
pub async fn update_bus(
    State(state): State<AppState>,
    Path(bus_id): Path<i32>,
    Json(payload): Json<UpdateBusRequest>,
) -> AppResult<Json<bus::Model>> {
    let existing = bus::Entity::find_by_id(bus_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Bus not found".to_string()))?;

    let mut active: bus::ActiveModel = existing.into();

    if let Some(bus_number) = payload.bus_number {
        let taken = bus::Entity::find()
            .filter(bus::Column::BusNumber.eq(&bus_number))
            .filter(bus::Column::Id.ne(bus_id))
            .one(&state.db)
            .await?;
        if taken.is_some() {
            return Err(AppError::Conflict(format!(
                "Bus number {} is already registered",
                bus_number
            )));
        }
        active.bus_number = Set(bus_number);
    }
    if let Some(bus_type) = payload.bus_type {
        active.bus_type = Set(bus_type);
    }
    if let Some(capacity) = payload.capacity {
        if capacity < 1 {
            return Err(AppError::Validation {
                field: "capacity".to_string(),
                message: "Capacity must be a positive integer".to_string(),
            });
        }
        active.capacity = Set(capacity);
    }
    if let Some(available) = payload.availability_status {
        active.availability_status = Set(available);
    }

    Ok(Json(active.update(&state.db).await?))
}

/// Remove a bus and, via cascade, its scheduled route instances (admin)
pub async fn delete_bus(
    State(state): State<AppState>,
    Path(bus_id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let existing = bus::Entity::find_by_id(bus_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Bus not found".to_string()))?;

    bus::Entity::delete_by_id(existing.id).exec(&state.db).await?;

    Ok(Json(serde_json::json!({ "message": "Bus deleted" })))
}

// ============ Route management ============

#[derive(Debug, Deserialize)]
pub struct CreateRouteRequest {
    pub start_location: String,
    pub end_location: String,
    #[serde(default)]
    pub stops: String,
    pub scheduled_time: chrono::NaiveTime,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRouteRequest {
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub stops: Option<String>,
    pub scheduled_time: Option<chrono::NaiveTime>,
}

/// Create a route (admin)
pub async fn create_route(
    State(state): State<AppState>,
    Json(payload): Json<CreateRouteRequest>,
) -> AppResult<(StatusCode, Json<route::Model>)> {
    let created = route::ActiveModel {
        start_location: Set(payload.start_location),
        end_location: Set(payload.end_location),
        stops: Set(payload.stops),
        scheduled_time: Set(payload.scheduled_time),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a route (admin)
pub async fn update_route(
    State(state): State<AppState>,
    Path(route_id): Path<i32>,
    Json(payload): Json<UpdateRouteRequest>,
) -> AppResult<Json<route::Model>> {
    let existing = route::Entity::find_by_id(route_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

    let mut active: route::ActiveModel = existing.into();

    if let Some(start) = payload.start_location {
        active.start_location = Set(start);
    }
    if let Some(end) = payload.end_location {
        active.end_location = Set(end);
    }
    if let Some(stops) = payload.stops {
        active.stops = Set(stops);
    }
    if let Some(time) = payload.scheduled_time {
        active.scheduled_time = Set(time);
    }

    Ok(Json(active.update(&state.db).await?))
}

/// Remove a route and, via cascade, its scheduled instances (admin)
pub async fn delete_route(
    State(state): State<AppState>,
    Path(route_id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let existing = route::Entity::find_by_id(route_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

    route::Entity::delete_by_id(existing.id)
        .exec(&state.db)
        .await?;

    Ok(Json(serde_json::json!({ "message": "Route deleted" })))
}
