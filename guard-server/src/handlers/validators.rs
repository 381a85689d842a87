//! Validator handlers: stake, unstake, slash, lookup

use axum::{extract::{Path, State}, Json};
use guard_core::ValidatorInfo;
use validator::Validate;

use crate::middleware::auth::CallerContext;
use crate::models::{AmountRequest, SlashRequest};
use crate::{AppError, AppResult, AppState};

use super::parse_address;

pub async fn stake(
    State(state): State<AppState>,
    caller: CallerContext,
    Json(req): Json<AmountRequest>,
) -> AppResult<Json<ValidatorInfo>> {
    req.validate()?;
    let info = state.guard.write(|g| g.stake(caller.address, req.amount))?;
    tracing::info!(
        "Validator {} staked {} (active: {})",
        caller.address, req.amount, info.is_active
    );
    Ok(Json(info))
}

pub async fn unstake(
    State(state): State<AppState>,
    caller: CallerContext,
    Json(req): Json<AmountRequest>,
) -> AppResult<Json<ValidatorInfo>> {
    req.validate()?;
    let info = state.guard.write(|g| g.unstake(caller.address, req.amount))?;
    Ok(Json(info))
}

pub async fn slash(
    State(state): State<AppState>,
    caller: CallerContext,
    Path(address): Path<String>,
    Json(req): Json<SlashRequest>,
) -> AppResult<Json<ValidatorInfo>> {
    req.validate()?;
    let validator = parse_address(&address)?;
    let info = state
        .guard
        .write(|g| g.slash(caller.address, validator, req.amount, &req.reason))?;
    tracing::warn!(
        "Validator {} slashed {} by {}: {}",
        validator, req.amount, caller.address, req.reason
    );
    Ok(Json(info))
}

pub async fn get(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> AppResult<Json<ValidatorInfo>> {
    let address = parse_address(&address)?;
    state
        .guard
        .read(|g| g.validator_info(&address))
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Validator not found".to_string()))
}

pub async fn list(State(state): State<AppState>) -> Json<Vec<ValidatorInfo>> {
    Json(state.guard.read(|g| g.validators()))
}
