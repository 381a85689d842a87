//! Collateral token: balances and the development faucet

use axum::{extract::{Path, State}, Json};
use guard_core::TokenLedger;

use crate::middleware::auth::CallerContext;
use crate::models::{BalanceResponse, FaucetRequest};
use crate::{AppError, AppResult, AppState};

use super::parse_address;

const DEFAULT_FAUCET_AMOUNT: u128 = 5_000;
const MAX_FAUCET_AMOUNT: u128 = 1_000_000;

pub async fn balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> AppResult<Json<BalanceResponse>> {
    let address = parse_address(&address)?;
    let balance = state.guard.read(|g| g.token().balance_of(&address));
    Ok(Json(BalanceResponse { address, balance }))
}

/// Mint test collateral to the caller. Development only.
pub async fn faucet(
    State(state): State<AppState>,
    caller: CallerContext,
    Json(req): Json<FaucetRequest>,
) -> AppResult<Json<BalanceResponse>> {
    if state.config.is_production() {
        return Err(AppError::Forbidden);
    }
    let amount = req.amount.unwrap_or(DEFAULT_FAUCET_AMOUNT);
    if amount == 0 || amount > MAX_FAUCET_AMOUNT {
        return Err(AppError::ValidationError(format!(
            "faucet amount must be between 1 and {}",
            MAX_FAUCET_AMOUNT
        )));
    }

    let balance = state.guard.write(|g| {
        g.token_mut().mint(caller.address, amount)?;
        Ok::<_, guard_core::GuardError>(g.token().balance_of(&caller.address))
    })?;
    tracing::info!("Faucet minted {} to {}", amount, caller.address);
    Ok(Json(BalanceResponse { address: caller.address, balance }))
}
