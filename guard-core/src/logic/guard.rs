//! Transaction Guard - core state
//!
//! One struct owns every store. Mutations follow a fixed order:
//! authorize → validate → external transfer → commit → emit.
//! Any failure before commit leaves every store untouched.
//!
//! ## Pipeline
//! Oracle score → `submit` → ledger → stats → event → `is_safe` for consumers

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::access::{AccessControl, Role};
use super::events::{EventKind, EventLog, GuardEvent, JournalRecorder};
use super::gate::{self, GatePolicy, GateState};
use super::ledger::{
    validate_score, AssessmentLedger, ContractRisk, ContractRiskTable, RiskAssessment,
    ThreatCategory, Verdict,
};
use super::protocols::{ProtocolEntry, ProtocolKind, ProtocolRegistry, Registration, RegistryStats};
use super::stake::{StakeRegistry, ValidatorInfo};
use super::stats::{CountingMode, FirewallReport, FirewallStats, StatsAggregator};
use super::token::TokenLedger;
use crate::constants::{
    DEFAULT_AUTHORITY_ADDRESS, DEFAULT_BLOCK_THRESHOLD, DEFAULT_CUSTODY_ADDRESS,
    DEFAULT_EVENT_HISTORY_LIMIT, DEFAULT_MIN_STAKE, DEFAULT_TREASURY_ADDRESS, MAX_RISK_SCORE,
};
use crate::error::{GuardError, GuardResult};
use crate::primitives::{Address, TxId};

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Holds every role implicitly; the only address that may grant roles
    pub authority: Address,
    pub custody: Address,
    pub treasury: Address,
    pub min_stake: u128,
    pub block_threshold: u8,
    pub gate_policy: GatePolicy,
    pub counting_mode: CountingMode,
    pub event_history_limit: usize,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            authority: DEFAULT_AUTHORITY_ADDRESS,
            custody: DEFAULT_CUSTODY_ADDRESS,
            treasury: DEFAULT_TREASURY_ADDRESS,
            min_stake: DEFAULT_MIN_STAKE,
            block_threshold: DEFAULT_BLOCK_THRESHOLD,
            gate_policy: GatePolicy::default(),
            counting_mode: CountingMode::default(),
            event_history_limit: DEFAULT_EVENT_HISTORY_LIMIT,
        }
    }
}

impl GuardConfig {
    pub fn validate(&self) -> GuardResult<()> {
        if self.block_threshold == 0 || self.block_threshold > MAX_RISK_SCORE {
            return Err(GuardError::InvalidInput(format!(
                "block threshold {} outside [1, {}]",
                self.block_threshold, MAX_RISK_SCORE
            )));
        }
        if self.min_stake == 0 {
            return Err(GuardError::InvalidInput("minimum stake must be positive".to_string()));
        }
        if self.custody == self.treasury {
            return Err(GuardError::InvalidInput(
                "custody and treasury must be different accounts".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// RESULTS
// ============================================================================

/// Outcome of an accepted submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub assessment: RiskAssessment,
    pub verdict: Verdict,
    /// Verdict of the overwritten record, if this was a re-assessment
    pub previous: Option<Verdict>,
    /// Whether the statistics counters moved
    pub counted: bool,
}

// ============================================================================
// GUARD
// ============================================================================

#[derive(Debug)]
pub struct TransactionGuard<T: TokenLedger> {
    config: GuardConfig,
    token: T,
    access: AccessControl,
    stake: StakeRegistry,
    ledger: AssessmentLedger,
    contracts: ContractRiskTable,
    protocols: ProtocolRegistry,
    stats: StatsAggregator,
    events: EventLog,
}

impl<T: TokenLedger> TransactionGuard<T> {
    pub fn new(config: GuardConfig, token: T) -> GuardResult<Self> {
        config.validate()?;
        log::info!(
            "Transaction guard ready: min_stake={}, block_threshold={}, gate={}, counting={}",
            config.min_stake, config.block_threshold, config.gate_policy, config.counting_mode
        );

        Ok(Self {
            access: AccessControl::new(config.authority),
            stake: StakeRegistry::new(config.min_stake, config.custody, config.treasury),
            ledger: AssessmentLedger::new(config.block_threshold),
            contracts: ContractRiskTable::new(),
            protocols: ProtocolRegistry::new(),
            stats: StatsAggregator::new(config.counting_mode),
            events: EventLog::new(config.event_history_limit),
            token,
            config,
        })
    }

    /// Mirror every event into append-only journal files
    pub fn with_recorder(mut self, recorder: JournalRecorder) -> Self {
        self.events = self.events.with_recorder(recorder);
        self
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn token(&self) -> &T {
        &self.token
    }

    /// Direct token access, for minting in demos and tests
    pub fn token_mut(&mut self) -> &mut T {
        &mut self.token
    }

    // ========================================================================
    // VALIDATORS
    // ========================================================================

    pub fn stake(&mut self, caller: Address, amount: u128) -> GuardResult<ValidatorInfo> {
        let plan = self.stake.plan_stake(&self.token, caller, amount)?;
        plan.transfer.execute(&mut self.token)?;

        let now = Utc::now();
        let info = self.stake.commit_stake(&plan, now);
        self.events.emit(
            EventKind::ValidatorStaked {
                validator: caller,
                amount,
                total_staked: info.validator.staked_amount,
            },
            now,
        );
        Ok(info)
    }

    pub fn unstake(&mut self, caller: Address, amount: u128) -> GuardResult<ValidatorInfo> {
        let plan = self.stake.plan_unstake(caller, amount)?;
        plan.transfer.execute(&mut self.token)?;

        let now = Utc::now();
        let info = self.stake.commit_unstake(&plan, now);
        self.events.emit(
            EventKind::ValidatorUnstaked {
                validator: caller,
                amount,
                remaining: info.validator.staked_amount,
            },
            now,
        );
        Ok(info)
    }

    pub fn slash(
        &mut self,
        caller: Address,
        validator: Address,
        amount: u128,
        reason: &str,
    ) -> GuardResult<ValidatorInfo> {
        self.access.require(&caller, Role::Slasher)?;
        let plan = self.stake.plan_slash(validator, amount, reason)?;
        plan.transfer.execute(&mut self.token)?;

        let now = Utc::now();
        let info = self.stake.commit_slash(&plan, now);
        self.events.emit(
            EventKind::ValidatorSlashed {
                validator,
                amount,
                reason: plan.reason,
                slashed_by: caller,
            },
            now,
        );
        Ok(info)
    }

    pub fn is_active(&self, validator: &Address) -> bool {
        self.stake.is_active(validator)
    }

    pub fn validator_info(&self, validator: &Address) -> Option<ValidatorInfo> {
        self.stake.info(validator)
    }

    pub fn validators(&self) -> Vec<ValidatorInfo> {
        self.stake.list()
    }

    // ========================================================================
    // ASSESSMENTS
    // ========================================================================

    pub fn submit(
        &mut self,
        caller: Address,
        tx_id: TxId,
        risk_score: u32,
        category: ThreatCategory,
    ) -> GuardResult<SubmitReceipt> {
        self.submit_with_exposure(caller, tx_id, risk_score, category, 0)
    }

    /// `value_at_risk` is added to `funds_protected` when the submission blocks
    pub fn submit_with_exposure(
        &mut self,
        caller: Address,
        tx_id: TxId,
        risk_score: u32,
        category: ThreatCategory,
        value_at_risk: u128,
    ) -> GuardResult<SubmitReceipt> {
        if !self.stake.is_active(&caller) {
            log::warn!("Rejected assessment of {} from inactive validator {}", tx_id, caller);
            return Err(GuardError::NotAuthorized);
        }
        let risk_score = validate_score(risk_score)?;

        let now = Utc::now();
        let write = self.ledger.write(tx_id, risk_score, category, caller, value_at_risk, now);
        self.stake.record_assessment(&caller, now);

        let verdict = write.assessment.verdict();
        let counted = self.stats.apply_verdict(tx_id, verdict, value_at_risk);

        let kind = match verdict {
            Verdict::Approved => EventKind::TransactionApproved {
                tx_id,
                risk_score,
                submitted_by: caller,
            },
            Verdict::Blocked => {
                log::warn!("Blocked {} (score {}, {})", tx_id, risk_score, category.label());
                EventKind::TransactionBlocked {
                    tx_id,
                    risk_score,
                    category,
                    submitted_by: caller,
                }
            }
        };
        self.events.emit(kind, now);

        Ok(SubmitReceipt {
            assessment: write.assessment,
            verdict,
            previous: write.previous,
            counted,
        })
    }

    pub fn assessment(&self, tx_id: &TxId) -> Option<RiskAssessment> {
        self.ledger.get(tx_id).cloned()
    }

    pub fn recent_assessments(&self, limit: usize) -> Vec<RiskAssessment> {
        self.ledger.recent(limit)
    }

    // ========================================================================
    // GATE
    // ========================================================================

    pub fn is_safe(&self, tx_id: &TxId) -> bool {
        gate::is_safe(self.ledger.get(tx_id), self.config.gate_policy)
    }

    pub fn gate_state(&self, tx_id: &TxId) -> GateState {
        gate::state_of(self.ledger.get(tx_id))
    }

    pub fn require_safe(&self, tx_id: &TxId) -> GuardResult<()> {
        gate::require_safe(*tx_id, self.ledger.get(tx_id), self.config.gate_policy)
    }

    pub fn gate_policy(&self) -> GatePolicy {
        self.config.gate_policy
    }

    // ========================================================================
    // PROTOCOLS
    // ========================================================================

    pub fn register_protocol(
        &mut self,
        caller: Address,
        address: Address,
        name: &str,
        kind: ProtocolKind,
    ) -> GuardResult<(ProtocolEntry, Registration)> {
        self.access.require(&caller, Role::RegistryAdmin)?;
        let now = Utc::now();
        let (entry, outcome) = self.protocols.register(address, name, kind, now)?;
        self.events.emit(
            EventKind::ProtocolRegistered {
                protocol: address,
                name: entry.name.clone(),
                kind,
                outcome,
            },
            now,
        );
        Ok((entry, outcome))
    }

    /// Returns false if the protocol was already inactive
    pub fn deactivate_protocol(&mut self, caller: Address, address: Address) -> GuardResult<bool> {
        self.access.require(&caller, Role::RegistryAdmin)?;
        let now = Utc::now();
        let changed = self.protocols.deactivate(&address, now)?;
        if changed {
            self.events.emit(EventKind::ProtocolDeactivated { protocol: address }, now);
        }
        Ok(changed)
    }

    pub fn protocol_stats(&self) -> RegistryStats {
        self.protocols.stats()
    }

    pub fn is_protocol_active(&self, address: &Address) -> bool {
        self.protocols.is_active(address)
    }

    pub fn protocol(&self, address: &Address) -> Option<ProtocolEntry> {
        self.protocols.get(address).cloned()
    }

    pub fn protocols(&self, active_only: bool) -> Vec<ProtocolEntry> {
        self.protocols.list(active_only)
    }

    // ========================================================================
    // STATISTICS
    // ========================================================================

    /// Record an exploit stopped outside the assessment flow
    pub fn record_exploit_prevented(
        &mut self,
        caller: Address,
        target: Address,
        potential_loss: u128,
        category: ThreatCategory,
    ) -> GuardResult<FirewallStats> {
        self.access.require(&caller, Role::Oracle)?;
        self.stats.record_block(potential_loss);
        log::warn!(
            "Exploit prevented on {} ({}), potential loss {}",
            target,
            category.label(),
            potential_loss
        );
        self.events.emit(
            EventKind::ExploitPrevented {
                target,
                potential_loss,
                category,
                reported_by: caller,
            },
            Utc::now(),
        );
        Ok(self.stats.stats())
    }

    pub fn stats(&self) -> FirewallStats {
        self.stats.stats()
    }

    pub fn report(&self) -> FirewallReport {
        FirewallReport {
            stats: self.stats.stats(),
            active_validators: self.stake.active_count() as u64,
            total_staked: self.stake.total_staked(),
        }
    }

    // ========================================================================
    // CONTRACT RISK
    // ========================================================================

    pub fn update_contract_risk(
        &mut self,
        caller: Address,
        contract: Address,
        risk_score: u32,
    ) -> GuardResult<ContractRisk> {
        self.batch_update_contract_risk(caller, &[(contract, risk_score)])?
            .pop()
            .ok_or_else(|| GuardError::InvalidInput("no contract score written".to_string()))
    }

    /// All-or-nothing. An empty batch is a no-op.
    pub fn batch_update_contract_risk(
        &mut self,
        caller: Address,
        updates: &[(Address, u32)],
    ) -> GuardResult<Vec<ContractRisk>> {
        self.access.require(&caller, Role::Oracle)?;
        let now = Utc::now();
        let written = self.contracts.apply(updates, caller, now)?;
        for entry in &written {
            self.events.emit(
                EventKind::ContractRiskUpdated {
                    contract: entry.contract,
                    risk_score: entry.risk_score,
                    updated_by: caller,
                },
                now,
            );
        }
        Ok(written)
    }

    pub fn contract_risk(&self, contract: &Address) -> Option<ContractRisk> {
        self.contracts.get(contract).cloned()
    }

    // ========================================================================
    // ROLES
    // ========================================================================

    /// Returns true if the grant is new
    pub fn grant_role(&mut self, caller: Address, who: Address, role: Role) -> GuardResult<bool> {
        let added = self.access.grant(&caller, who, role)?;
        if added {
            log::info!("Granted {} to {}", role, who);
            self.events.emit(EventKind::RoleGranted { who, role }, Utc::now());
        }
        Ok(added)
    }

    /// Returns true if a grant was removed
    pub fn revoke_role(&mut self, caller: Address, who: Address, role: Role) -> GuardResult<bool> {
        let removed = self.access.revoke(&caller, &who, role)?;
        if removed {
            log::info!("Revoked {} from {}", role, who);
            self.events.emit(EventKind::RoleRevoked { who, role }, Utc::now());
        }
        Ok(removed)
    }

    pub fn has_role(&self, who: &Address, role: Role) -> bool {
        self.access.has_role(who, role)
    }

    pub fn roles_of(&self, who: &Address) -> Vec<Role> {
        self.access.roles_of(who)
    }

    // ========================================================================
    // EVENTS
    // ========================================================================

    /// Newest first
    pub fn events(&self, limit: usize) -> Vec<GuardEvent> {
        self.events.recent(limit)
    }

    pub fn last_event_sequence(&self) -> u64 {
        self.events.last_sequence()
    }

    pub fn journal_write_failures(&self) -> u64 {
        self.events.write_failures()
    }
}

// ============================================================================
// SHARED HANDLE
// ============================================================================

/// Single writer, many readers. Each closure runs under the lock for its
/// whole read-modify-write; never hold it across an await point.
pub struct SharedGuard<T: TokenLedger> {
    inner: Arc<RwLock<TransactionGuard<T>>>,
}

impl<T: TokenLedger> Clone for SharedGuard<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: TokenLedger> SharedGuard<T> {
    pub fn new(guard: TransactionGuard<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(guard)),
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&TransactionGuard<T>) -> R) -> R {
        f(&self.inner.read())
    }

    pub fn write<R>(&self, f: impl FnOnce(&mut TransactionGuard<T>) -> R) -> R {
        f(&mut self.inner.write())
    }
}

// ============================================================================
// TESTS
// ============================================================================
