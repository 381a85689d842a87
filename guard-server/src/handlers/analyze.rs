//! Offline risk analysis. Advisory only; nothing is recorded.

use axum::{extract::State, Json};
use guard_core::{GuardError, TransactionProfile};
use validator::Validate;

use crate::models::{AnalyzeRequest, AnalyzeResponse};
use crate::{AppResult, AppState};

use super::parse_address;

pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> AppResult<Json<AnalyzeResponse>> {
    req.validate()?;
    let profile = TransactionProfile {
        from: req.from.as_deref().map(parse_address).transpose()?,
        to: req.to.as_deref().map(parse_address).transpose()?,
        function_name: req.function_name.clone(),
        gas_limit: req.gas_limit,
        value: req.value,
        call_data_len: call_data_len(req.data.as_deref())?,
    };

    let verdict = state.scorer.assess(&profile);
    let block_threshold = state.config.block_threshold;
    tracing::debug!(
        "Analyzed call to {:?}: score {} ({})",
        profile.to, verdict.risk_score, verdict.category
    );

    Ok(Json(AnalyzeResponse {
        would_block: verdict.risk_score >= block_threshold,
        verdict,
        block_threshold,
    }))
}

fn call_data_len(data: Option<&str>) -> AppResult<usize> {
    let Some(data) = data else {
        return Ok(0);
    };
    let digits = data.strip_prefix("0x").unwrap_or(data);
    let bytes = hex::decode(digits)
        .map_err(|e| GuardError::InvalidInput(format!("call data is not hex: {}", e)))?;
    Ok(bytes.len())
}
