//! Contract risk handlers

use axum::{extract::{Path, State}, Json};
use guard_core::{Address, ContractRisk};
use validator::Validate;

use crate::middleware::auth::CallerContext;
use crate::models::{BatchContractRiskRequest, ContractRiskRequest};
use crate::{AppError, AppResult, AppState};

use super::{parse_address, parse_score};

pub async fn update(
    State(state): State<AppState>,
    caller: CallerContext,
    Json(req): Json<ContractRiskRequest>,
) -> AppResult<Json<ContractRisk>> {
    req.validate()?;
    let contract = parse_address(&req.contract)?;
    let score = parse_score(req.risk_score)?;
    let entry = state
        .guard
        .write(|g| g.update_contract_risk(caller.address, contract, score))?;
    Ok(Json(entry))
}

/// All entries are parsed before any is written
pub async fn batch_update(
    State(state): State<AppState>,
    caller: CallerContext,
    Json(req): Json<BatchContractRiskRequest>,
) -> AppResult<Json<Vec<ContractRisk>>> {
    req.validate()?;
    let updates = req
        .updates
        .iter()
        .map(|u| Ok((parse_address(&u.contract)?, parse_score(u.risk_score)?)))
        .collect::<AppResult<Vec<(Address, u32)>>>()?;

    let written = state
        .guard
        .write(|g| g.batch_update_contract_risk(caller.address, &updates))?;
    tracing::info!("{} updated {} contract scores", caller.address, written.len());
    Ok(Json(written))
}

pub async fn get(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> AppResult<Json<ContractRisk>> {
    let contract = parse_address(&address)?;
    state
        .guard
        .read(|g| g.contract_risk(&contract))
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No risk score for contract".to_string()))
}
