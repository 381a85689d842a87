//! Gate query handler for dependent consumers

use axum::{extract::{Path, State}, Json};

use crate::models::GateResponse;
use crate::{AppResult, AppState};

use super::parse_tx_id;

pub async fn check(
    State(state): State<AppState>,
    Path(tx_id): Path<String>,
) -> AppResult<Json<GateResponse>> {
    let tx_id = parse_tx_id(&tx_id)?;
    let response = state.guard.read(|g| GateResponse {
        tx_id,
        is_safe: g.is_safe(&tx_id),
        state: g.gate_state(&tx_id),
        policy: g.gate_policy(),
    });
    Ok(Json(response))
}
