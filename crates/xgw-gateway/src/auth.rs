//! C7 — bearer-token auth.
//!
//! Mirrors the role the original's OAuth2 password grant plays: a client
//! trades a username/password for a short-lived bearer token, and every
//! other endpoint requires that token. We keep the password-grant shape but
//! implement the token itself as a signed JWT so verification needs no
//! shared server-side session state.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: u64,
}

/// Issues a bearer token for `user_id`, valid for `ttl`.
pub fn issue_token(user_id: u64, secret: &str, ttl: Duration) -> Result<String, AppError> {
    let exp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before epoch")
        + ttl;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: exp.as_secs(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("failed to sign token: {e}")))
}

fn verify_token(token: &str, secret: &str) -> Result<u64, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthenticated)?;
    data.claims.sub.parse().map_err(|_| {
        AppError::Internal(format!(
            "token subject {:?} is not a valid user id",
            data.claims.sub
        ))
    })
}

/// The authenticated caller's `user_id`, extracted from the `Authorization:
/// Bearer <jwt>` header. Handlers that require auth just take this as an
/// argument; axum rejects the request before the handler body runs if it's
/// missing or invalid.
pub struct AuthUser {
    pub user_id: u64,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthenticated)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthenticated)?;

        let user_id = verify_token(token, &state.config.jwt_secret)?;
        Ok(AuthUser { user_id })
    }
}
