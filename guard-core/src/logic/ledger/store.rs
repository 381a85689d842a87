//! Assessment Store
//!
//! txId -> latest `RiskAssessment`. Overwrites replace the record; the
//! event journal is the only history.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::types::{RiskAssessment, ThreatCategory, Verdict};
use crate::constants::MAX_RISK_SCORE;
use crate::error::{GuardError, GuardResult};
use crate::primitives::{Address, TxId};

/// Range check shared by every score entry point
pub fn validate_score(score: u32) -> GuardResult<u8> {
    if score > MAX_RISK_SCORE as u32 {
        return Err(GuardError::InvalidScore(score as i64));
    }
    Ok(score as u8)
}

/// Result of a ledger write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerWrite {
    pub assessment: RiskAssessment,
    pub previous: Option<Verdict>,
}

#[derive(Debug, Clone)]
pub struct AssessmentLedger {
    records: HashMap<TxId, RiskAssessment>,
    block_threshold: u8,
}

impl AssessmentLedger {
    pub fn new(block_threshold: u8) -> Self {
        Self {
            records: HashMap::new(),
            block_threshold,
        }
    }

    pub fn get(&self, tx_id: &TxId) -> Option<&RiskAssessment> {
        self.records.get(tx_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write or overwrite. `risk_score` must already be validated.
    pub fn write(
        &mut self,
        tx_id: TxId,
        risk_score: u8,
        category: ThreatCategory,
        submitted_by: Address,
        value_at_risk: u128,
        now: DateTime<Utc>,
    ) -> LedgerWrite {
        let previous = self.records.get(&tx_id);
        let previous_verdict = previous.map(|a| a.verdict());
        let revision = previous.map(|a| a.revision.saturating_add(1)).unwrap_or(1);

        let assessment = RiskAssessment {
            tx_id,
            risk_score,
            category,
            submitted_by,
            submitted_at: now,
            is_blocked: Verdict::from_score(risk_score, self.block_threshold) == Verdict::Blocked,
            value_at_risk,
            revision,
        };
        self.records.insert(tx_id, assessment.clone());

        LedgerWrite {
            assessment,
            previous: previous_verdict,
        }
    }

    /// Most recent writes first
    pub fn recent(&self, limit: usize) -> Vec<RiskAssessment> {
        let mut list: Vec<RiskAssessment> = self.records.values().cloned().collect();
        list.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at).then(a.tx_id.cmp(&b.tx_id)));
        list.truncate(limit);
        list
    }
}
