//! Risk Scoring
//!
//! The scorer produces untrusted input for `submit`: the guard validates
//! only range and authorization, never whether the score is right.
//!
//! `HeuristicScorer` is the offline fallback: a decision table keyed on
//! known malicious entry points plus a few transaction indicators.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_RISK_SCORE;
use crate::logic::ledger::ThreatCategory;
use crate::primitives::Address;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Score for a call to a known malicious entry point
const MALICIOUS_FUNCTION_SCORE: u8 = 94;

/// Score when no indicator fires
const SAFE_SCORE: u8 = 15;

const FLAGGED_RECIPIENT_WEIGHT: u32 = 40;
const HIGH_GAS_WEIGHT: u32 = 25;
const LARGE_VALUE_WEIGHT: u32 = 15;
const COMPLEX_DATA_WEIGHT: u32 = 10;

const HIGH_GAS_LIMIT: u64 = 300_000;

/// 1000 whole tokens at 18 decimals
const LARGE_VALUE: u128 = 1_000_000_000_000_000_000_000;

/// 1000 hex characters of call data
const COMPLEX_CALL_DATA_BYTES: usize = 500;

const HIGH_RISK_PATTERN: u8 = 70;
/// Scores above this without a flagged recipient are suspicious
const SUSPICIOUS_ABOVE: u8 = 50;

// ============================================================================
// TYPES
// ============================================================================

/// What the scorer sees of a pending transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionProfile {
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub function_name: Option<String>,
    pub gas_limit: Option<u64>,
    #[serde(default)]
    pub value: u128,
    /// Decoded call data, in bytes
    #[serde(default)]
    pub call_data_len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreVerdict {
    pub risk_score: u8,
    pub category: ThreatCategory,
    pub indicators: Vec<String>,
    pub reasoning: String,
    pub provider: String,
}

pub trait RiskScorer: Send + Sync {
    fn name(&self) -> &'static str;

    fn assess(&self, profile: &TransactionProfile) -> ScoreVerdict;
}

// ============================================================================
// HEURISTIC SCORER
// ============================================================================

#[derive(Debug, Clone)]
pub struct HeuristicScorer {
    flagged_recipients: HashSet<Address>,
    malicious_functions: Vec<(String, ThreatCategory)>,
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        let flagged_recipients = [
            "0x1234567890abcdef1234567890abcdef12345678",
            "0xabcdef1234567890abcdef1234567890abcdef12",
            "0x9876543210fedcba9876543210fedcba98765432",
        ]
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

        Self {
            flagged_recipients,
            malicious_functions: vec![
                ("drainLiquidity".to_string(), ThreatCategory::LiquidityDrain),
                ("rugPull".to_string(), ThreatCategory::RugPull),
                ("sandwichAttack".to_string(), ThreatCategory::Sandwich),
            ],
        }
    }
}

impl HeuristicScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flagged(mut self, address: Address) -> Self {
        self.flagged_recipients.insert(address);
        self
    }

    pub fn with_malicious_function(mut self, name: &str, category: ThreatCategory) -> Self {
        self.malicious_functions.push((name.to_string(), category));
        self
    }

    pub fn is_flagged(&self, address: &Address) -> bool {
        self.flagged_recipients.contains(address)
    }

    fn malicious_function(&self, name: &str) -> Option<ThreatCategory> {
        self.malicious_functions
            .iter()
            .find(|(f, _)| f == name)
            .map(|(_, category)| *category)
    }
}

impl RiskScorer for HeuristicScorer {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn assess(&self, profile: &TransactionProfile) -> ScoreVerdict {
        let mut score: u32 = 0;
        let mut indicators = Vec::new();

        let flagged = profile.to.as_ref().is_some_and(|to| self.is_flagged(to));
        if flagged {
            score += FLAGGED_RECIPIENT_WEIGHT;
            indicators.push("malicious-address".to_string());
        }
        if profile.gas_limit.is_some_and(|gas| gas > HIGH_GAS_LIMIT) {
            score += HIGH_GAS_WEIGHT;
            indicators.push("high-gas-limit".to_string());
        }
        if profile.value > LARGE_VALUE {
            score += LARGE_VALUE_WEIGHT;
            indicators.push("large-value-transfer".to_string());
        }
        if profile.call_data_len > COMPLEX_CALL_DATA_BYTES {
            score += COMPLEX_DATA_WEIGHT;
            indicators.push("complex-call-data".to_string());
        }

        let function_category = profile
            .function_name
            .as_deref()
            .and_then(|name| self.malicious_function(name));
        if function_category.is_some() {
            score = score.max(MALICIOUS_FUNCTION_SCORE as u32);
            indicators.push("known-malicious-function".to_string());
        }

        let matched = !indicators.is_empty();
        let risk_score = if !matched {
            indicators.push("normal-transaction".to_string());
            SAFE_SCORE
        } else {
            score.min(MAX_RISK_SCORE as u32) as u8
        };
        if risk_score > HIGH_RISK_PATTERN {
            indicators.push("high-risk-pattern".to_string());
        }

        let category = match function_category {
            Some(category) => category,
            None if flagged => ThreatCategory::MaliciousContract,
            None if risk_score > SUSPICIOUS_ABOVE => ThreatCategory::Suspicious,
            None => ThreatCategory::Normal,
        };

        let reasoning = match (function_category, flagged) {
            (Some(_), _) => format!(
                "Call to known malicious function '{}'",
                profile.function_name.as_deref().unwrap_or_default()
            ),
            (None, true) => "Recipient address flagged as malicious".to_string(),
            (None, false) if !matched => "No risk indicators matched".to_string(),
            (None, false) => format!("Matched indicators: {}", indicators.join(", ")),
        };

        ScoreVerdict {
            risk_score,
            category,
            indicators,
            reasoning,
            provider: self.name().to_string(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn call(function: &str) -> TransactionProfile {
        TransactionProfile {
            function_name: Some(function.to_string()),
            gas_limit: Some(21_000),
            ..Default::default()
        }
    }

    #[test]
    fn test_known_malicious_functions() {
        let scorer = HeuristicScorer::new();
        for (name, category) in [
            ("drainLiquidity", ThreatCategory::LiquidityDrain),
            ("rugPull", ThreatCategory::RugPull),
            ("sandwichAttack", ThreatCategory::Sandwich),
        ] {
            let verdict = scorer.assess(&call(name));
            assert_eq!(verdict.risk_score, 94, "{}", name);
            assert_eq!(verdict.category, category);
            assert!(verdict.indicators.contains(&"known-malicious-function".to_string()));
        }
    }

    #[test]
    fn test_plain_swap_is_safe() {
        let verdict = HeuristicScorer::new().assess(&call("swap"));
        assert_eq!(verdict.risk_score, 15);
        assert_eq!(verdict.category, ThreatCategory::Normal);
        assert_eq!(verdict.indicators, vec!["normal-transaction".to_string()]);
    }

    #[test]
    fn test_indicators_accumulate() {
        let evil: Address = "0x1234567890abcdef1234567890abcdef12345678".parse().unwrap();
        let profile = TransactionProfile {
            to: Some(evil),
            gas_limit: Some(500_000),
            value: LARGE_VALUE + 1,
            call_data_len: 2_048,
            ..Default::default()
        };
        let verdict = HeuristicScorer::new().assess(&profile);
        assert_eq!(verdict.risk_score, 90);
        assert_eq!(verdict.category, ThreatCategory::MaliciousContract);
        assert!(verdict.indicators.contains(&"high-risk-pattern".to_string()));
    }

    #[test]
    fn test_unflagged_indicators_stop_at_fifty() {
        let profile = TransactionProfile {
            gas_limit: Some(400_000),
            value: LARGE_VALUE * 2,
            call_data_len: 4_000,
            ..Default::default()
        };
        let verdict = HeuristicScorer::new().assess(&profile);
        assert_eq!(verdict.risk_score, 50);
        assert_eq!(verdict.category, ThreatCategory::Normal);
        assert!(verdict.reasoning.starts_with("Matched indicators"));

        let custom = HeuristicScorer::new().with_flagged(Address::from_low_u64(5));
        let verdict = custom.assess(&TransactionProfile {
            to: Some(Address::from_low_u64(5)),
            gas_limit: Some(400_000),
            ..Default::default()
        });
        assert_eq!(verdict.risk_score, 65);
        assert_eq!(verdict.category, ThreatCategory::MaliciousContract);
    }

    #[test]
    fn test_call_data_threshold_counts_hex_characters() {
        let scorer = HeuristicScorer::new();
        let at_limit = TransactionProfile { call_data_len: 500, ..Default::default() };
        let over = TransactionProfile { call_data_len: 501, ..Default::default() };

        assert_eq!(scorer.assess(&at_limit).risk_score, 15);
        let verdict = scorer.assess(&over);
        assert_eq!(verdict.risk_score, 10);
        assert_eq!(verdict.indicators, vec!["complex-call-data".to_string()]);
    }

    #[test]
    fn test_custom_malicious_function() {
        let scorer = HeuristicScorer::new().with_malicious_function("flashBorrow", ThreatCategory::FlashLoan);
        let verdict = scorer.assess(&call("flashBorrow"));
        assert_eq!(verdict.category, ThreatCategory::FlashLoan);
        assert_eq!(verdict.provider, "heuristic");
    }

    #[test]
    fn test_deterministic() {
        let scorer = HeuristicScorer::new();
        assert_eq!(scorer.assess(&call("rugPull")), scorer.assess(&call("rugPull")));
    }
}
