//! Decision Gate
//!
//! The only predicate dependent consumers rely on. Input: the ledger record
//! (if any) + policy. Output: allow / deny.
//!
//! Per txId: Unassessed -> Approved | Blocked, and Approved <-> Blocked only
//! through a fresh submission. Unassessed is never stored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GuardError, GuardResult};
use crate::logic::ledger::{RiskAssessment, Verdict};
use crate::primitives::TxId;

/// What the gate answers for a txId nobody has assessed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePolicy {
    /// Unassessed means unsafe
    #[default]
    FailClosed,
    /// Unassessed means safe
    FailOpen,
}

impl GatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatePolicy::FailClosed => "fail_closed",
            GatePolicy::FailOpen => "fail_open",
        }
    }
}

impl fmt::Display for GatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GatePolicy {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fail_closed" | "closed" => Ok(GatePolicy::FailClosed),
            "fail_open" | "open" => Ok(GatePolicy::FailOpen),
            other => Err(GuardError::InvalidInput(format!("unknown gate policy '{}'", other))),
        }
    }
}

/// Per-txId gate state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    Unassessed,
    Approved,
    Blocked,
}

impl From<Verdict> for GateState {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Approved => GateState::Approved,
            Verdict::Blocked => GateState::Blocked,
        }
    }
}

// ============================================================================
// DECISION FUNCTIONS
// ============================================================================

pub fn state_of(record: Option<&RiskAssessment>) -> GateState {
    match record {
        Some(assessment) => assessment.verdict().into(),
        None => GateState::Unassessed,
    }
}

pub fn is_safe(record: Option<&RiskAssessment>, policy: GatePolicy) -> bool {
    match state_of(record) {
        GateState::Approved => true,
        GateState::Blocked => false,
        GateState::Unassessed => policy == GatePolicy::FailOpen,
    }
}

/// `Ok` iff the gate allows `tx_id`
pub fn require_safe(tx_id: TxId, record: Option<&RiskAssessment>, policy: GatePolicy) -> GuardResult<()> {
    if is_safe(record, policy) {
        Ok(())
    } else {
        log::debug!("Gate denied {} ({:?})", tx_id, state_of(record));
        Err(GuardError::TransactionBlocked(tx_id))
    }
}

// ============================================================================
// TESTS
// ============================================================================
