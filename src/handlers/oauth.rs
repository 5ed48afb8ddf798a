use axum::{
    extract::{Form, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::Deserialize;

use crate::entities::user;
use crate::error::AppResult;
use crate::utils::session::session_cookie;
use crate::AppState;

const GOOGLE_BACKEND: &str = "google";

#[derive(Debug, Deserialize)]
pub struct GoogleCallbackForm {
    pub credential: Option<String>,
}

fn back_to_app_hint(frontend: &str) -> String {
    format!(
        "</br> Go back to the application here: <a href='{}'>{}</a>",
        frontend, frontend
    )
}

fn error_page(status: StatusCode, message: &str, frontend: &str) -> Response {
    (
        status,
        Html(format!("{} {}", message, back_to_app_hint(frontend))),
    )
        .into_response()
}

/// GET on the callback URL is meaningless; Google always POSTs.
pub async fn google_oauth_get(State(state): State<AppState>) -> Response {
    error_page(
        StatusCode::METHOD_NOT_ALLOWED,
        "Not sure what you are trying to do here",
        &state.config.frontend_url,
    )
}

/// Google calls this URL after the user has signed in with their Google
/// account. Verifies the ID token, resolves it to a local account (creating
/// one on first sign-in), and establishes a session.
pub async fn google_oauth(
    State(state): State<AppState>,
    Form(form): Form<GoogleCallbackForm>,
) -> AppResult<Response> {
    let frontend = &state.config.frontend_url;

    let Some(credential) = form.credential else {
        return Ok(error_page(
            StatusCode::BAD_REQUEST,
            "No credential provided",
            frontend,
        ));
    };

    let claims = match state
        .verifier
        .verify(&credential, &state.config.google_oauth_client_id)
        .await
    {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!("Google token verification failed: {}", err);
            return Ok(error_page(
                StatusCode::FORBIDDEN,
                "Failed to process",
                frontend,
            ));
        }
    };

    if !claims.email_verified {
        return Ok(error_page(
            StatusCode::BAD_REQUEST,
            "Email is not verified",
            frontend,
        ));
    }

    // The claim email is lowercased before an exact-match lookup, while
    // registration stores the email verbatim. Inherited inconsistency;
    // pinned by a test rather than unified.
    let email = claims.email.to_lowercase();

    let existing = user::Entity::find()
        .filter(user::Column::Email.eq(&email))
        .one(&state.db)
        .await?;

    let user = match existing {
        Some(found) => {
            let mut active: user::ActiveModel = found.into();
            active.first_name = Set(claims.given_name.clone());
            active.last_name = Set(claims.family_name.clone());
            active.full_name = Set(Some(user::full_name(
                &claims.given_name,
                &claims.family_name,
                &email,
            )));
            active.update(&state.db).await?
        }
        None => {
            let new_user = user::ActiveModel {
                email: Set(email.clone()),
                first_name: Set(claims.given_name.clone()),
                last_name: Set(claims.family_name.clone()),
                full_name: Set(Some(user::full_name(
                    &claims.given_name,
                    &claims.family_name,
                    &email,
                ))),
                is_active: Set(true),
                created_at: Set(chrono::Utc::now().into()),
                ..Default::default()
            };
            let created = new_user.insert(&state.db).await?;
            tracing::info!(user_id = created.id, "Created account from Google sign-in");
            created
        }
    };

    let cookie = session_cookie(&user, GOOGLE_BACKEND, &state.config.jwt_secret)?;

    Ok((
        StatusCode::FOUND,
        [
            (header::LOCATION, frontend.clone()),
            (header::SET_COOKIE, cookie),
        ],
    )
        .into_response())
}
