use axum::{extract::State, http::StatusCode, Json};
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, Set};
use serde::Deserialize;

use crate::entities::reservation::{self, City, DurationType, VehicleType};
use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub name: String,
    pub mobile_no: String,
    pub date_of_travel: NaiveDate,
    pub duration_type: DurationType,
    pub passenger_numbers: i32,
    pub journey_from: City,
    pub journey_to: City,
    pub vehicle_type: VehicleType,
    pub comment: Option<String>,
}

pub fn validate_reservation(payload: &CreateReservationRequest) -> AppResult<()> {
    if payload.journey_from == payload.journey_to {
        return Err(AppError::BadRequest(
            "Journey From and Journey To cannot be the same".to_string(),
        ));
    }

    if payload.date_of_travel < Utc::now().date_naive() {
        return Err(AppError::BadRequest(
            "Date of Travel cannot be in the past".to_string(),
        ));
    }

    if payload.passenger_numbers < 1 {
        return Err(AppError::Validation {
            field: "passenger_numbers".to_string(),
            message: "Number of passengers must be a positive integer".to_string(),
        });
    }

    let digits = payload.mobile_no.chars().filter(|c| c.is_ascii_digit()).count();
    if digits < 10 {
        return Err(AppError::Validation {
            field: "mobile_no".to_string(),
            message: "Mobile number must contain at least 10 digits".to_string(),
        });
    }

    Ok(())
}

/// Create a vehicle rental reservation
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(payload): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<reservation::Model>)> {
    validate_reservation(&payload)?;

    let created = reservation::ActiveModel {
        name: Set(payload.name),
        mobile_no: Set(payload.mobile_no),
        date_of_travel: Set(payload.date_of_travel),
        duration_type: Set(payload.duration_type),
        passenger_numbers: Set(payload.passenger_numbers),
        journey_from: Set(payload.journey_from),
        journey_to: Set(payload.journey_to),
        vehicle_type: Set(payload.vehicle_type),
        comment: Set(payload.comment),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    tracing::info!(reservation_id = created.id, "Created rental reservation");

    Ok((StatusCode::CREATED, Json(created)))
}
