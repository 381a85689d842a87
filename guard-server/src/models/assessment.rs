//! Assessment and gate models

use guard_core::{GatePolicy, GateState, TxId};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAssessmentRequest {
    #[validate(length(min = 64, max = 66))]
    pub tx_id: String,
    /// Signed so out-of-range input reaches the guard as `invalid_score`
    pub risk_score: i64,
    #[validate(length(min = 1, max = 64))]
    pub category: String,
    #[serde(default)]
    pub value_at_risk: u128,
}

#[derive(Debug, Deserialize)]
pub struct AssessmentListQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct GateResponse {
    pub tx_id: TxId,
    pub is_safe: bool,
    pub state: GateState,
    pub policy: GatePolicy,
}
