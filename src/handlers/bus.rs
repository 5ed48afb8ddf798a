use axum::{
    extract::{Path, Query, State},
    Json,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};
use serde::{Deserialize, Serialize};

use crate::entities::bus::{self, BusType};
use crate::entities::{bus_route, route};
use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct BusRouteResponse {
    pub id: i32,
    pub bus: bus::Model,
    pub route: route::Model,
    pub date: chrono::NaiveDate,
    pub available_seats: i32,
}

impl BusRouteResponse {
    pub fn new(instance: bus_route::Model, bus: bus::Model, route: route::Model) -> Self {
        Self {
            id: instance.id,
            bus,
            route,
            date: instance.date,
            available_seats: instance.available_seats,
        }
    }
}

/// Load the bus and route referenced by a bus-route instance and build the
/// nested response.
pub async fn expand_bus_route(
    state: &AppState,
    instance: bus_route::Model,
) -> AppResult<BusRouteResponse> {
    let bus = bus::Entity::find_by_id(instance.bus_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Internal("Bus not found for bus route".to_string()))?;

    let route = route::Entity::find_by_id(instance.route_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Internal("Route not found for bus route".to_string()))?;

    Ok(BusRouteResponse::new(instance, bus, route))
}

// ============ Buses ============

#[derive(Debug, Deserialize)]
pub struct ListBusesQuery {
    pub bus_type: Option<BusType>,
    pub availability_status: Option<bool>,
    /// Substring match on bus_number
    pub search: Option<String>,
    /// `bus_number` or `capacity`, prefix with `-` for descending
    pub ordering: Option<String>,
}

/// List buses with optional filtering, search and ordering
pub async fn list_buses(
    State(state): State<AppState>,
    Query(query): Query<ListBusesQuery>,
) -> AppResult<Json<Vec<bus::Model>>> {
    let mut select = bus::Entity::find();

    if let Some(bus_type) = query.bus_type {
        select = select.filter(bus::Column::BusType.eq(bus_type));
    }
    if let Some(available) = query.availability_status {
        select = select.filter(bus::Column::AvailabilityStatus.eq(available));
    }
    if let Some(search) = query.search.filter(|s| !s.is_empty()) {
        select = select.filter(bus::Column::BusNumber.contains(&search));
    }

    select = match query.ordering.as_deref() {
        Some("bus_number") => select.order_by_asc(bus::Column::BusNumber),
        Some("-bus_number") => select.order_by_desc(bus::Column::BusNumber),
        Some("capacity") => select.order_by_asc(bus::Column::Capacity),
        Some("-capacity") => select.order_by_desc(bus::Column::Capacity),
        _ => select.order_by_asc(bus::Column::Id),
    };

    Ok(Json(select.all(&state.db).await?))
}

pub async fn get_bus(
    State(state): State<AppState>,
    Path(bus_id): Path<i32>,
) -> AppResult<Json<bus::Model>> {
    let bus = bus::Entity::find_by_id(bus_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Bus not found".to_string()))?;

    Ok(Json(bus))
}

// ============ Routes ============

#[derive(Debug, Deserialize)]
pub struct ListRoutesQuery {
    /// Substring match on start or end location
    pub search: Option<String>,
}

pub async fn list_routes(
    State(state): State<AppState>,
    Query(query): Query<ListRoutesQuery>,
) -> AppResult<Json<Vec<route::Model>>> {
    let mut select = route::Entity::find();

    if let Some(search) = query.search.filter(|s| !s.is_empty()) {
        select = select.filter(
            Condition::any()
                .add(route::Column::StartLocation.contains(&search))
                .add(route::Column::EndLocation.contains(&search)),
        );
    }

    Ok(Json(select.order_by_asc(route::Column::Id).all(&state.db).await?))
}

pub async fn get_route(
    State(state): State<AppState>,
    Path(route_id): Path<i32>,
) -> AppResult<Json<route::Model>> {
    let route = route::Entity::find_by_id(route_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

    Ok(Json(route))
}

// ============ Bus-route instances ============

#[derive(Debug, Deserialize)]
pub struct ListBusRoutesQuery {
    pub date: Option<chrono::NaiveDate>,
    /// Filter by the assigned bus's type
    pub bus_type: Option<BusType>,
    /// Substring match on the route's starting point
    pub start_location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBusRouteRequest {
    pub bus: i32,
    pub route: i32,
    pub date: chrono::NaiveDate,
    pub available_seats: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBusRouteRequest {
    pub bus: Option<i32>,
    pub route: Option<i32>,
    pub date: Option<chrono::NaiveDate>,
    pub available_seats: Option<i32>,
}

pub async fn list_bus_routes(
    State(state): State<AppState>,
    Query(query): Query<ListBusRoutesQuery>,
) -> AppResult<Json<Vec<BusRouteResponse>>> {
    let mut select = bus_route::Entity::find();

    if let Some(date) = query.date {
        select = select.filter(bus_route::Column::Date.eq(date));
    }
    if let Some(bus_type) = query.bus_type {
        select = select
            .join(JoinType::InnerJoin, bus_route::Relation::Bus.def())
            .filter(bus::Column::BusType.eq(bus_type));
    }
    if let Some(start) = query.start_location.filter(|s| !s.is_empty()) {
        select = select
            .join(JoinType::InnerJoin, bus_route::Relation::Route.def())
            .filter(route::Column::StartLocation.contains(&start));
    }

    let instances = select.order_by_asc(bus_route::Column::Id).all(&state.db).await?;
    let buses = bus::Entity::find().all(&state.db).await?;
    let routes = route::Entity::find().all(&state.db).await?;

    let responses: Vec<BusRouteResponse> = instances
        .into_iter()
        .filter_map(|instance| {
            let bus = buses.iter().find(|b| b.id == instance.bus_id)?.clone();
            let route = routes.iter().find(|r| r.id == instance.route_id)?.clone();
            Some(BusRouteResponse::new(instance, bus, route))
        })
        .collect();

    Ok(Json(responses))
}

pub async fn get_bus_route(
    State(state): State<AppState>,
    Path(bus_route_id): Path<i32>,
) -> AppResult<Json<BusRouteResponse>> {
    let instance = bus_route::Entity::find_by_id(bus_route_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Bus route not found".to_string()))?;

    Ok(Json(expand_bus_route(&state, instance).await?))
}

pub async fn create_bus_route(
    State(state): State<AppState>,
    Json(payload): Json<CreateBusRouteRequest>,
) -> AppResult<(axum::http::StatusCode, Json<BusRouteResponse>)> {
    let bus = bus::Entity::find_by_id(payload.bus)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Validation {
            field: "bus".to_string(),
            message: format!("Bus {} does not exist", payload.bus),
        })?;

    let route = route::Entity::find_by_id(payload.route)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Validation {
            field: "route".to_string(),
            message: format!("Route {} does not exist", payload.route),
        })?;

    let created = bus_route::ActiveModel {
        bus_id: Set(payload.bus),
        route_id: Set(payload.route),
        date: Set(payload.date),
        available_seats: Set(payload.available_seats),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(BusRouteResponse::new(created, bus, route)),
    ))
}

pub async fn update_bus_route(
    State(state): State<AppState>,
    Path(bus_route_id): Path<i32>,
    Json(payload): Json<UpdateBusRouteRequest>,
) -> AppResult<Json<BusRouteResponse>> {
    let instance = bus_route::Entity::find_by_id(bus_route_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Bus route not found".to_string()))?;

    let mut active: bus_route::ActiveModel = instance.into();

    if let Some(bus_id) = payload.bus {
        bus::Entity::find_by_id(bus_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::Validation {
                field: "bus".to_string(),
                message: format!("Bus {} does not exist", bus_id),
            })?;
        active.bus_id = Set(bus_id);
    }
    if let Some(route_id) = payload.route {
        route::Entity::find_by_id(route_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::Validation {
                field: "route".to_string(),
                message: format!("Route {} does not exist", route_id),
            })?;
        active.route_id = Set(route_id);
    }
    if let Some(date) = payload.date {
        active.date = Set(date);
    }
    if let Some(seats) = payload.available_seats {
        active.available_seats = Set(seats);
    }

    let updated = active.update(&state.db).await?;

    Ok(Json(expand_bus_route(&state, updated).await?))
}

pub async fn delete_bus_route(
    State(state): State<AppState>,
    Path(bus_route_id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let instance = bus_route::Entity::find_by_id(bus_route_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Bus route not found".to_string()))?;

    bus_route::Entity::delete_by_id(instance.id)
        .exec(&state.db)
        .await?;

    Ok(Json(serde_json::json!({ "message": "Bus route deleted" })))
}
