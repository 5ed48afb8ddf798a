use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, Json};
use chrono::{DateTime, Duration, Utc};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::entities::profile::{self, UserType};
use crate::entities::user;
use crate::error::{AppError, AppResult};
use crate::utils::jwt::create_token;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_number: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub expires: DateTime<Utc>,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<user::Model> for UserInfo {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Register a new customer account. The account starts inactive and must be
/// activated by an admin before it can log in.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<UserInfo>> {
    // Case-insensitive taken-email check
    let existing = user::Entity::find()
        .filter(
            Expr::expr(Func::lower(Expr::col(user::Column::Email)))
                .eq(payload.email.to_lowercase()),
        )
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(AppError::Conflict("The email is already taken".to_string()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?
        .to_string();

    let payload_email = payload.email.clone();
    let first = payload.first_name.clone();
    let last = payload.last_name.clone();
    let phone = payload.phone_number.clone();

    let created = state
        .db
        .transaction::<_, user::Model, AppError>(move |txn: &DatabaseTransaction| {
            Box::pin(async move {
                let new_user = user::ActiveModel {
                    email: Set(payload_email.clone()),
                    username: Set(payload_email.clone()),
                    first_name: Set(first.clone()),
                    last_name: Set(last.clone()),
                    full_name: Set(Some(user::full_name(&first, &last, &payload_email))),
                    password_hash: Set(Some(password_hash)),
                    is_active: Set(false),
                    created_at: Set(Utc::now().into()),
                    ..Default::default()
                };

                let created = new_user.insert(txn).await?;

                let new_profile = profile::ActiveModel {
                    user_id: Set(created.id),
                    user_type: Set(UserType::Customer),
                    phone_number: Set(phone),
                    ..Default::default()
                };
                new_profile.insert(txn).await?;

                Ok(created)
            })
        })
        .await?;

    tracing::info!(user_id = created.id, "Registered new customer account");

    Ok(Json(created.into()))
}

/// Login with email and password, issuing a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // Inactive accounts get a dedicated message before any credential check
    let inactive = user::Entity::find()
        .filter(
            Expr::expr(Func::lower(Expr::col(user::Column::Email)))
                .eq(payload.email.to_lowercase()),
        )
        .filter(user::Column::IsActive.eq(false))
        .one(&state.db)
        .await?;

    if inactive.is_some() {
        return Err(AppError::BadRequest(
            "Request an admin to activate your account".to_string(),
        ));
    }

    let user = user::Entity::find()
        .filter(user::Column::Email.eq(&payload.email))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Unauthorized("The email or password is invalid".to_string()))?;

    let stored_hash = user
        .password_hash
        .as_deref()
        .ok_or_else(|| AppError::Unauthorized("The email or password is invalid".to_string()))?;

    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::Internal(format!("Failed to parse password hash: {}", e)))?;

    Argon2::default()
        .verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized("The email or password is invalid".to_string()))?;

    let user_type = profile::Entity::find()
        .filter(profile::Column::UserId.eq(user.id))
        .one(&state.db)
        .await?
        .map(|p| p.user_type)
        .unwrap_or(UserType::Customer);

    let token = create_token(
        user.id,
        &user.email,
        user_type,
        &state.config.jwt_secret,
        state.config.jwt_expiration_hours,
    )?;

    Ok(Json(AuthResponse {
        token,
        expires: Utc::now() + Duration::hours(state.config.jwt_expiration_hours),
        user: user.into(),
    }))
}
