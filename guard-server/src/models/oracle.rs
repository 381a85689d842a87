//! Oracle models: contract risk, prevented exploits, offline analysis

use guard_core::ScoreVerdict;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContractRiskRequest {
    pub contract: String,
    pub risk_score: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BatchContractRiskRequest {
    #[validate(length(max = 256))]
    pub updates: Vec<ContractRiskRequest>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ExploitReportRequest {
    pub target: String,
    pub potential_loss: u128,
    #[validate(length(min = 1, max = 64))]
    pub category: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct AnalyzeRequest {
    pub from: Option<String>,
    pub to: Option<String>,
    #[validate(length(max = 128))]
    pub function_name: Option<String>,
    pub gas_limit: Option<u64>,
    #[serde(default)]
    pub value: u128,
    /// Hex call data, optional 0x prefix
    #[validate(length(max = 262144))]
    pub data: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub verdict: ScoreVerdict,
    pub would_block: bool,
    pub block_threshold: u8,
}
