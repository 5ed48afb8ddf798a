use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::Deserialize;

use crate::entities::{faq, feedback_review};
use crate::error::{AppError, AppResult};
use crate::utils::jwt::Claims;
use crate::AppState;

fn default_rating() -> i32 {
    5
}

#[derive(Debug, Deserialize)]
pub struct CreateFeedbackRequest {
    pub title: String,
    pub content: String,
    #[serde(default = "default_rating")]
    pub rating: i32,
}

// ============ Feedback reviews ============

pub async fn list_feedback_reviews(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<feedback_review::Model>>> {
    let reviews = feedback_review::Entity::find()
        .order_by_asc(feedback_review::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(reviews))
}

pub async fn get_feedback_review(
    State(state): State<AppState>,
    Path(review_id): Path<i32>,
) -> AppResult<Json<feedback_review::Model>> {
    let review = feedback_review::Entity::find_by_id(review_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Feedback review not found".to_string()))?;

    Ok(Json(review))
}

/// Create a feedback review as the authenticated user
pub async fn create_feedback_review(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateFeedbackRequest>,
) -> AppResult<(StatusCode, Json<feedback_review::Model>)> {
    let now = chrono::Utc::now();
    let created = feedback_review::ActiveModel {
        user_id: Set(claims.sub),
        title: Set(payload.title),
        content: Set(payload.content),
        rating: Set(payload.rating),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Reviews are immutable once posted
pub async fn update_feedback_review(Path(_review_id): Path<i32>) -> AppError {
    AppError::MethodNotAllowed("Method 'PUT' not allowed".to_string())
}

pub async fn delete_feedback_review(Path(_review_id): Path<i32>) -> AppError {
    AppError::MethodNotAllowed("Method 'DELETE' not allowed".to_string())
}

// ============ FAQs ============

pub async fn list_faqs(State(state): State<AppState>) -> AppResult<Json<Vec<faq::Model>>> {
    let faqs = faq::Entity::find()
        .order_by_asc(faq::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(faqs))
}

pub async fn get_faq(
    State(state): State<AppState>,
    Path(faq_id): Path<i32>,
) -> AppResult<Json<faq::Model>> {
    let faq = faq::Entity::find_by_id(faq_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("FAQ not found".to_string()))?;

    Ok(Json(faq))
}
