//! Contract Risk Table
//!
//! Per-contract scores pushed by oracles, independent of per-transaction
//! assessments. Reporting only; the gate never reads it.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::store::validate_score;
use crate::error::GuardResult;
use crate::primitives::Address;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRisk {
    pub contract: Address,
    pub risk_score: u8,
    pub updated_by: Address,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ContractRiskTable {
    scores: HashMap<Address, ContractRisk>,
}

impl ContractRiskTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, contract: &Address) -> Option<&ContractRisk> {
        self.scores.get(contract)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// All-or-nothing: every score is validated before any is written
    pub fn apply(
        &mut self,
        updates: &[(Address, u32)],
        updated_by: Address,
        now: DateTime<Utc>,
    ) -> GuardResult<Vec<ContractRisk>> {
        let validated = updates
            .iter()
            .map(|(contract, score)| validate_score(*score).map(|s| (*contract, s)))
            .collect::<GuardResult<Vec<_>>>()?;

        let written = validated
            .into_iter()
            .map(|(contract, risk_score)| {
                let entry = ContractRisk {
                    contract,
                    risk_score,
                    updated_by,
                    updated_at: now,
                };
                self.scores.insert(contract, entry.clone());
                entry
            })
            .collect();
        Ok(written)
    }
}
