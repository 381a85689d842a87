//! Risk Assessment Ledger
//!
//! - `types` - threat categories, verdicts, assessment records
//! - `store` - txId keyed assessment store
//! - `contracts` - per-contract risk scores set by oracles

pub mod types;
pub mod store;
pub mod contracts;

pub use types::*;
pub use store::{validate_score, AssessmentLedger, LedgerWrite};
pub use contracts::{ContractRisk, ContractRiskTable};
