//! Firewall statistics handler

use axum::{extract::State, Json};
use guard_core::CountingMode;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub transactions_screened: u64,
    pub exploits_blocked: u64,
    pub funds_protected: u128,
    pub active_validators: u64,
    pub total_staked: u128,
    pub counting_mode: CountingMode,
}

pub async fn get(State(state): State<AppState>) -> Json<StatsResponse> {
    let (report, counting_mode) = state.guard.read(|g| (g.report(), g.config().counting_mode));
    Json(StatsResponse {
        transactions_screened: report.stats.transactions_screened,
        exploits_blocked: report.stats.exploits_blocked,
        funds_protected: report.stats.funds_protected,
        active_validators: report.active_validators,
        total_staked: report.total_staked,
        counting_mode,
    })
}
