use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::entities::user;
use crate::error::{AppError, AppResult};

pub const SESSION_COOKIE: &str = "sessionid";

const AUTH_USER_ID_KEY: &str = "_auth_user_id";
const AUTH_BACKEND_KEY: &str = "_auth_user_backend";
const AUTH_HASH_KEY: &str = "_auth_user_hash";

const SESSION_AGE_HOURS: i64 = 24 * 14;

/// Signed session payload. Entries are an ordered list: the auth user id
/// comes first, then the backend marker, then the credential hash.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionPayload {
    pub entries: Vec<(String, String)>,
    pub exp: i64,
    pub iat: i64,
}

/// Hash tying the session to the user's current credential, so a password
/// change invalidates existing sessions.
fn auth_hash(user: &user::Model, secret: &str) -> String {
    let credential = user.password_hash.as_deref().unwrap_or(&user.email);
    let digest = Sha256::digest(format!("{}:{}", secret, credential).as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Encode the session for `user` as a signed token suitable for a cookie
/// value.
pub fn create_session(user: &user::Model, backend: &str, secret: &str) -> AppResult<String> {
    let now = Utc::now();

    let payload = SessionPayload {
        entries: vec![
            (AUTH_USER_ID_KEY.to_string(), user.id.to_string()),
            (AUTH_BACKEND_KEY.to_string(), backend.to_string()),
            (AUTH_HASH_KEY.to_string(), auth_hash(user, secret)),
        ],
        exp: (now + Duration::hours(SESSION_AGE_HOURS)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &payload,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to create session: {}", e)))
}

pub fn decode_session(token: &str, secret: &str) -> AppResult<SessionPayload> {
    decode::<SessionPayload>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid session: {}", e)))
}

/// Full Set-Cookie header value for an established session.
pub fn session_cookie(user: &user::Model, backend: &str, secret: &str) -> AppResult<String> {
    let token = create_session(user, backend, secret)?;
    Ok(format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, token
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_user() -> user::Model {
        user::Model {
            id: 42,
            email: "a@b.com".to_string(),
            username: String::new(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            full_name: Some("A B".to_string()),
            password_hash: None,
            is_active: true,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn session_has_three_entries_with_user_id_first() {
        let user = sample_user();
        let token = create_session(&user, "google", "secret").unwrap();
        let payload = decode_session(&token, "secret").unwrap();

        assert_eq!(payload.entries.len(), 3);
        assert_eq!(payload.entries[0].0, AUTH_USER_ID_KEY);
        assert_eq!(payload.entries[0].1, "42");
        assert_eq!(payload.entries[1].0, AUTH_BACKEND_KEY);
        assert_eq!(payload.entries[1].1, "google");
        assert_eq!(payload.entries[2].0, AUTH_HASH_KEY);
    }

    #[test]
    fn tampered_session_is_rejected() {
        let user = sample_user();
        let token = create_session(&user, "google", "secret").unwrap();
        assert!(decode_session(&token, "not-the-secret").is_err());
    }
}
