use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;

/// Identity attributes returned by Google after a successful verification.
#[derive(Debug, Clone)]
pub struct GoogleClaims {
    pub email: String,
    pub email_verified: bool,
    pub given_name: String,
    pub family_name: String,
}

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("token verification request failed: {0}")]
    Request(String),
}

/// Verifies an ID token against the identity provider. Kept behind a trait
/// so tests can substitute a canned verifier.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, credential: &str, audience: &str) -> Result<GoogleClaims, VerifyError>;
}

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Google's tokeninfo endpoint returns every claim as a string.
#[derive(Debug, Deserialize)]
struct TokenInfoResponse {
    aud: String,
    exp: String,
    email: Option<String>,
    email_verified: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
}

pub struct GoogleTokenVerifier {
    http: reqwest::Client,
}

impl GoogleTokenVerifier {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for GoogleTokenVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenVerifier for GoogleTokenVerifier {
    async fn verify(&self, credential: &str, audience: &str) -> Result<GoogleClaims, VerifyError> {
        let response = self
            .http
            .get(TOKENINFO_URL)
            .query(&[("id_token", credential)])
            .send()
            .await
            .map_err(|e| VerifyError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(VerifyError::InvalidToken(format!(
                "tokeninfo returned {}",
                response.status()
            )));
        }

        let info: TokenInfoResponse = response
            .json()
            .await
            .map_err(|e| VerifyError::InvalidToken(e.to_string()))?;

        if info.aud != audience {
            return Err(VerifyError::InvalidToken("audience mismatch".to_string()));
        }

        let exp: i64 = info
            .exp
            .parse()
            .map_err(|_| VerifyError::InvalidToken("malformed exp claim".to_string()))?;
        if exp < Utc::now().timestamp() {
            return Err(VerifyError::InvalidToken("token expired".to_string()));
        }

        Ok(GoogleClaims {
            email: info
                .email
                .ok_or_else(|| VerifyError::InvalidToken("missing email claim".to_string()))?,
            email_verified: info.email_verified.as_deref() == Some("true"),
            given_name: info.given_name.unwrap_or_default(),
            family_name: info.family_name.unwrap_or_default(),
        })
    }
}
