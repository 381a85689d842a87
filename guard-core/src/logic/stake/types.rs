//! Stake Types
//!
//! Validator records and the plans produced by the registry's validation phase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::token::PendingTransfer;
use crate::primitives::Address;

/// A staking identity. Created on first stake, never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub address: Address,
    /// Token units currently held in custody for this validator
    pub staked_amount: u128,
    /// Set once, at the first successful stake
    pub joined_at: DateTime<Utc>,
    pub assessments_submitted: u64,
    pub total_slashed: u128,
    pub last_active_at: DateTime<Utc>,
}

impl Validator {
    pub fn is_active(&self, min_stake: u128) -> bool {
        self.staked_amount >= min_stake
    }
}

/// Read view returned by `validator_info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorInfo {
    pub validator: Validator,
    pub is_active: bool,
}

/// Validated stake deposit, waiting for its token transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakePlan {
    pub validator: Address,
    pub amount: u128,
    pub transfer: PendingTransfer,
}

/// Validated withdrawal of own stake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnstakePlan {
    pub validator: Address,
    pub amount: u128,
    pub transfer: PendingTransfer,
}

/// Validated slash, custody to treasury
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlashPlan {
    pub validator: Address,
    pub amount: u128,
    pub reason: String,
    pub transfer: PendingTransfer,
}
