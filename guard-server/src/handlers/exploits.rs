//! Prevented exploit reports

use axum::{extract::State, Json};
use guard_core::FirewallStats;
use validator::Validate;

use crate::middleware::auth::CallerContext;
use crate::models::ExploitReportRequest;
use crate::{AppResult, AppState};

use super::{parse_address, parse_category};

pub async fn record(
    State(state): State<AppState>,
    caller: CallerContext,
    Json(req): Json<ExploitReportRequest>,
) -> AppResult<Json<FirewallStats>> {
    req.validate()?;
    let target = parse_address(&req.target)?;
    let category = parse_category(&req.category)?;

    let stats = state.guard.write(|g| {
        g.record_exploit_prevented(caller.address, target, req.potential_loss, category)
    })?;
    Ok(Json(stats))
}
