//! Guard Event Types
//!
//! Immutable, timestamped records of committed mutations. Emitted only
//! after the mutation succeeded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::access::Role;
use crate::logic::ledger::ThreatCategory;
use crate::logic::protocols::{ProtocolKind, Registration};
use crate::primitives::{Address, TxId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ValidatorStaked {
        validator: Address,
        amount: u128,
        total_staked: u128,
    },
    ValidatorUnstaked {
        validator: Address,
        amount: u128,
        remaining: u128,
    },
    ValidatorSlashed {
        validator: Address,
        amount: u128,
        reason: String,
        slashed_by: Address,
    },
    TransactionApproved {
        tx_id: TxId,
        risk_score: u8,
        submitted_by: Address,
    },
    TransactionBlocked {
        tx_id: TxId,
        risk_score: u8,
        category: ThreatCategory,
        submitted_by: Address,
    },
    ExploitPrevented {
        target: Address,
        potential_loss: u128,
        category: ThreatCategory,
        reported_by: Address,
    },
    ContractRiskUpdated {
        contract: Address,
        risk_score: u8,
        updated_by: Address,
    },
    ProtocolRegistered {
        protocol: Address,
        name: String,
        kind: ProtocolKind,
        outcome: Registration,
    },
    ProtocolDeactivated {
        protocol: Address,
    },
    RoleGranted {
        who: Address,
        role: Role,
    },
    RoleRevoked {
        who: Address,
        role: Role,
    },
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::ValidatorStaked { .. } => "validator_staked",
            EventKind::ValidatorUnstaked { .. } => "validator_unstaked",
            EventKind::ValidatorSlashed { .. } => "validator_slashed",
            EventKind::TransactionApproved { .. } => "transaction_approved",
            EventKind::TransactionBlocked { .. } => "transaction_blocked",
            EventKind::ExploitPrevented { .. } => "exploit_prevented",
            EventKind::ContractRiskUpdated { .. } => "contract_risk_updated",
            EventKind::ProtocolRegistered { .. } => "protocol_registered",
            EventKind::ProtocolDeactivated { .. } => "protocol_deactivated",
            EventKind::RoleGranted { .. } => "role_granted",
            EventKind::RoleRevoked { .. } => "role_revoked",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardEvent {
    pub id: Uuid,
    /// Position in the total order of committed mutations
    pub sequence: u64,
    pub at: DateTime<Utc>,
    pub kind: EventKind,
}

impl GuardEvent {
    pub fn new(sequence: u64, at: DateTime<Utc>, kind: EventKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            sequence,
            at,
            kind,
        }
    }

    /// Single-line JSON
    pub fn to_jsonl(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
