//! Authentication handlers

use axum::{extract::State, Json};
use chrono::{Duration, Utc};
use guard_core::Address;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{DevTokenRequest, DevTokenResponse};
use crate::{AppError, AppResult, AppState};

use super::parse_address;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,      // Caller address
    pub exp: usize,       // Expiration timestamp
    pub iat: usize,       // Issued at
}

/// Issue a token for any address. Development only.
pub async fn dev_token(
    State(state): State<AppState>,
    Json(req): Json<DevTokenRequest>,
) -> AppResult<Json<DevTokenResponse>> {
    if state.config.is_production() {
        return Err(AppError::Forbidden);
    }
    req.validate()?;
    let address = parse_address(&req.address)?;

    let (token, expires_at) = generate_jwt(
        &address,
        &state.config.jwt_secret,
        state.config.jwt_expiration_hours,
    )?;
    tracing::info!("Issued development token for {}", address);

    Ok(Json(DevTokenResponse {
        token,
        address,
        expires_at,
    }))
}

/// Generate JWT token
pub fn generate_jwt(
    address: &Address,
    secret: &str,
    expiration_hours: u64,
) -> AppResult<(String, chrono::DateTime<Utc>)> {
    let now = Utc::now();
    let exp = i64::try_from(expiration_hours)
        .ok()
        .and_then(Duration::try_hours)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| {
            AppError::InternalError(format!("token lifetime of {} hours is out of range", expiration_hours))
        })?;

    let claims = Claims {
        sub: address.to_string(),
        exp: exp.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes())
    ).map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok((token, exp))
}
