//! Assessment handlers

use axum::{extract::{Path, Query, State}, Json};
use guard_core::{RiskAssessment, SubmitReceipt};
use validator::Validate;

use crate::middleware::auth::CallerContext;
use crate::models::{AssessmentListQuery, SubmitAssessmentRequest};
use crate::{AppError, AppResult, AppState};

use super::{parse_category, parse_score, parse_tx_id};

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 500;

/// Submit a verdict. Only active validators are accepted.
pub async fn submit(
    State(state): State<AppState>,
    caller: CallerContext,
    Json(req): Json<SubmitAssessmentRequest>,
) -> AppResult<Json<SubmitReceipt>> {
    req.validate()?;
    let tx_id = parse_tx_id(&req.tx_id)?;
    let category = parse_category(&req.category)?;
    let score = parse_score(req.risk_score)?;

    let receipt = state.guard.write(|g| {
        g.submit_with_exposure(caller.address, tx_id, score, category, req.value_at_risk)
    })?;

    tracing::info!(
        "Assessment {} by {}: score {} -> {}",
        tx_id,
        caller.address,
        score,
        receipt.verdict.as_str()
    );
    Ok(Json(receipt))
}

pub async fn get(
    State(state): State<AppState>,
    Path(tx_id): Path<String>,
) -> AppResult<Json<RiskAssessment>> {
    let tx_id = parse_tx_id(&tx_id)?;
    state
        .guard
        .read(|g| g.assessment(&tx_id))
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Assessment not found".to_string()))
}

/// Latest writes first
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<AssessmentListQuery>,
) -> Json<Vec<RiskAssessment>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    Json(state.guard.read(|g| g.recent_assessments(limit)))
}
