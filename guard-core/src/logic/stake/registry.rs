//! Stake Registry
//!
//! Two phases per mutation:
//! 1. `plan_*` validates against current state and returns a plan
//!    carrying the token transfer to perform. No state changes.
//! 2. `commit_*` applies the plan. Call only after the transfer succeeded.
//!
//! The caller must hold exclusive access across both phases.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::types::{SlashPlan, StakePlan, UnstakePlan, Validator, ValidatorInfo};
use crate::error::{GuardError, GuardResult};
use crate::logic::token::{PendingTransfer, TokenLedger};
use crate::primitives::Address;

#[derive(Debug, Clone)]
pub struct StakeRegistry {
    validators: HashMap<Address, Validator>,
    min_stake: u128,
    custody: Address,
    treasury: Address,
    total_staked: u128,
}

impl StakeRegistry {
    pub fn new(min_stake: u128, custody: Address, treasury: Address) -> Self {
        Self {
            validators: HashMap::new(),
            min_stake,
            custody,
            treasury,
            total_staked: 0,
        }
    }

    pub fn min_stake(&self) -> u128 {
        self.min_stake
    }

    pub fn custody(&self) -> Address {
        self.custody
    }

    pub fn treasury(&self) -> Address {
        self.treasury
    }

    fn staked_of(&self, who: &Address) -> u128 {
        self.validators.get(who).map(|v| v.staked_amount).unwrap_or(0)
    }

    // ========================================================================
    // READS
    // ========================================================================

    pub fn is_active(&self, who: &Address) -> bool {
        self.validators
            .get(who)
            .is_some_and(|v| v.is_active(self.min_stake))
    }

    pub fn info(&self, who: &Address) -> Option<ValidatorInfo> {
        self.validators.get(who).map(|v| to_info(v, self.min_stake))
    }

    pub fn active_count(&self) -> usize {
        self.validators
            .values()
            .filter(|v| v.is_active(self.min_stake))
            .count()
    }

    pub fn total_staked(&self) -> u128 {
        self.total_staked
    }

    /// All validators, highest stake first
    pub fn list(&self) -> Vec<ValidatorInfo> {
        let mut list: Vec<ValidatorInfo> = self
            .validators
            .keys()
            .filter_map(|addr| self.info(addr))
            .collect();
        list.sort_by(|a, b| {
            b.validator
                .staked_amount
                .cmp(&a.validator.staked_amount)
                .then(a.validator.address.cmp(&b.validator.address))
        });
        list
    }

    // ========================================================================
    // PHASE 1: PLAN
    // ========================================================================

    pub fn plan_stake<T: TokenLedger + ?Sized>(
        &self,
        token: &T,
        who: Address,
        amount: u128,
    ) -> GuardResult<StakePlan> {
        if amount == 0 {
            return Err(GuardError::InvalidAmount);
        }
        let available = token.balance_of(&who);
        if available < amount {
            return Err(GuardError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        self.staked_of(&who)
            .checked_add(amount)
            .ok_or(GuardError::Overflow)?;
        self.total_staked
            .checked_add(amount)
            .ok_or(GuardError::Overflow)?;

        Ok(StakePlan {
            validator: who,
            amount,
            transfer: PendingTransfer {
                from: who,
                to: self.custody,
                amount,
            },
        })
    }

    pub fn plan_unstake(&self, who: Address, amount: u128) -> GuardResult<UnstakePlan> {
        if amount == 0 {
            return Err(GuardError::InvalidAmount);
        }
        let staked = self.staked_of(&who);
        if amount > staked {
            return Err(GuardError::ExceedsStake {
                requested: amount,
                staked,
            });
        }
        Ok(UnstakePlan {
            validator: who,
            amount,
            transfer: PendingTransfer {
                from: self.custody,
                to: who,
                amount,
            },
        })
    }

    pub fn plan_slash(&self, validator: Address, amount: u128, reason: &str) -> GuardResult<SlashPlan> {
        if amount == 0 {
            return Err(GuardError::InvalidAmount);
        }
        let staked = self.staked_of(&validator);
        if amount > staked {
            return Err(GuardError::ExceedsStake {
                requested: amount,
                staked,
            });
        }
        Ok(SlashPlan {
            validator,
            amount,
            reason: reason.to_string(),
            transfer: PendingTransfer {
                from: self.custody,
                to: self.treasury,
                amount,
            },
        })
    }

    // ========================================================================
    // PHASE 2: COMMIT
    // ========================================================================

    pub fn commit_stake(&mut self, plan: &StakePlan, now: DateTime<Utc>) -> ValidatorInfo {
        let min_stake = self.min_stake;
        self.total_staked = self.total_staked.saturating_add(plan.amount);
        let validator = self.entry(plan.validator, now);
        validator.staked_amount = validator.staked_amount.saturating_add(plan.amount);
        validator.last_active_at = now;

        log::info!(
            "Validator {} staked {} (total {})",
            plan.validator, plan.amount, validator.staked_amount
        );
        to_info(validator, min_stake)
    }

    pub fn commit_unstake(&mut self, plan: &UnstakePlan, now: DateTime<Utc>) -> ValidatorInfo {
        let min_stake = self.min_stake;
        self.total_staked = self.total_staked.saturating_sub(plan.amount);
        let validator = self.entry(plan.validator, now);
        validator.staked_amount = validator.staked_amount.saturating_sub(plan.amount);
        validator.last_active_at = now;

        log::info!("Validator {} unstaked {}", plan.validator, plan.amount);
        to_info(validator, min_stake)
    }

    pub fn commit_slash(&mut self, plan: &SlashPlan, now: DateTime<Utc>) -> ValidatorInfo {
        let min_stake = self.min_stake;
        self.total_staked = self.total_staked.saturating_sub(plan.amount);
        let validator = self.entry(plan.validator, now);
        validator.staked_amount = validator.staked_amount.saturating_sub(plan.amount);
        validator.total_slashed = validator.total_slashed.saturating_add(plan.amount);

        log::warn!(
            "Validator {} slashed {}: {}",
            plan.validator, plan.amount, plan.reason
        );
        to_info(validator, min_stake)
    }

    /// Bookkeeping after an accepted assessment
    pub fn record_assessment(&mut self, who: &Address, now: DateTime<Utc>) {
        if let Some(v) = self.validators.get_mut(who) {
            v.assessments_submitted += 1;
            v.last_active_at = now;
        }
    }

    fn entry(&mut self, who: Address, now: DateTime<Utc>) -> &mut Validator {
        self.validators.entry(who).or_insert_with(|| Validator {
            address: who,
            staked_amount: 0,
            joined_at: now,
            assessments_submitted: 0,
            total_slashed: 0,
            last_active_at: now,
        })
    }
}

fn to_info(validator: &Validator, min_stake: u128) -> ValidatorInfo {
    ValidatorInfo {
        validator: validator.clone(),
        is_active: validator.is_active(min_stake),
    }
}
