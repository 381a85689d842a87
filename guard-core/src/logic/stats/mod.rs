//! Statistics Aggregator
//!
//! Monotonic counters. Mutated only as a side effect of gate decisions.
//!
//! `CountingMode` decides what happens when a txId is assessed again:
//! - `PerTransaction`: each (txId, outcome) pair is counted at most once
//! - `PerSubmission`: every submission counts

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GuardError;
use crate::logic::ledger::Verdict;
use crate::primitives::TxId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FirewallStats {
    pub transactions_screened: u64,
    pub exploits_blocked: u64,
    pub funds_protected: u128,
}

/// Counters plus validator-set figures, for dashboards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FirewallReport {
    pub stats: FirewallStats,
    pub active_validators: u64,
    pub total_staked: u128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountingMode {
    #[default]
    PerTransaction,
    PerSubmission,
}

impl CountingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CountingMode::PerTransaction => "per_transaction",
            CountingMode::PerSubmission => "per_submission",
        }
    }
}

impl fmt::Display for CountingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CountingMode {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "per_transaction" | "transaction" => Ok(CountingMode::PerTransaction),
            "per_submission" | "submission" => Ok(CountingMode::PerSubmission),
            other => Err(GuardError::InvalidInput(format!("unknown counting mode '{}'", other))),
        }
    }
}

/// Outcomes already counted for one txId
#[derive(Debug, Clone, Copy, Default)]
struct Counted {
    screened: bool,
    blocked: bool,
}

#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    stats: FirewallStats,
    mode: CountingMode,
    counted: HashMap<TxId, Counted>,
}

impl StatsAggregator {
    pub fn new(mode: CountingMode) -> Self {
        Self {
            stats: FirewallStats::default(),
            mode,
            counted: HashMap::new(),
        }
    }

    pub fn mode(&self) -> CountingMode {
        self.mode
    }

    pub fn stats(&self) -> FirewallStats {
        self.stats
    }

    pub fn record_screen(&mut self) {
        self.stats.transactions_screened = self.stats.transactions_screened.saturating_add(1);
    }

    pub fn record_block(&mut self, potential_loss: u128) {
        self.stats.exploits_blocked = self.stats.exploits_blocked.saturating_add(1);
        self.stats.funds_protected = self.stats.funds_protected.saturating_add(potential_loss);
    }

    /// Forward one submission outcome. Returns whether a counter moved.
    pub fn apply_verdict(&mut self, tx_id: TxId, verdict: Verdict, potential_loss: u128) -> bool {
        if self.mode == CountingMode::PerTransaction {
            let counted = self.counted.entry(tx_id).or_default();
            let seen = match verdict {
                Verdict::Approved => std::mem::replace(&mut counted.screened, true),
                Verdict::Blocked => std::mem::replace(&mut counted.blocked, true),
            };
            if seen {
                log::debug!("{} already counted as {}", tx_id, verdict.as_str());
                return false;
            }
        }

        match verdict {
            Verdict::Approved => self.record_screen(),
            Verdict::Blocked => self.record_block(potential_loss),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let agg = StatsAggregator::new(CountingMode::PerTransaction);
        assert_eq!(agg.stats(), FirewallStats::default());
    }

    #[test]
    fn test_record_block_accumulates_funds() {
        let mut agg = StatsAggregator::default();
        agg.record_block(50_000);
        agg.record_block(25);
        assert_eq!(agg.stats().exploits_blocked, 2);
        assert_eq!(agg.stats().funds_protected, 50_025);
    }

    #[test]
    fn test_per_transaction_counts_each_outcome_once() {
        let mut agg = StatsAggregator::new(CountingMode::PerTransaction);
        let tx = TxId::digest(b"H2");

        assert!(agg.apply_verdict(tx, Verdict::Blocked, 100));
        assert!(!agg.apply_verdict(tx, Verdict::Blocked, 100));
        assert!(agg.apply_verdict(tx, Verdict::Approved, 0));
        assert!(!agg.apply_verdict(tx, Verdict::Blocked, 100));

        let stats = agg.stats();
        assert_eq!(stats.exploits_blocked, 1);
        assert_eq!(stats.funds_protected, 100);
        assert_eq!(stats.transactions_screened, 1);
    }

    #[test]
    fn test_per_submission_counts_every_call() {
        let mut agg = StatsAggregator::new(CountingMode::PerSubmission);
        let tx = TxId::digest(b"H2");

        assert!(agg.apply_verdict(tx, Verdict::Blocked, 10));
        assert!(agg.apply_verdict(tx, Verdict::Blocked, 10));
        assert_eq!(agg.stats().exploits_blocked, 2);
        assert_eq!(agg.stats().funds_protected, 20);
    }

    #[test]
    fn test_counting_mode_parsing() {
        assert_eq!("per-submission".parse::<CountingMode>().unwrap(), CountingMode::PerSubmission);
        assert_eq!("PER_TRANSACTION".parse::<CountingMode>().unwrap(), CountingMode::PerTransaction);
        assert!("hourly".parse::<CountingMode>().is_err());
    }
}
