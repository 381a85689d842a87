//! Ledger Types
//!
//! Threat categories and assessment records. No logic beyond
//! classification helpers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GuardError;
use crate::primitives::{Address, TxId};

// ============================================================================
// THREAT CATEGORY
// ============================================================================

/// Closed set of threat classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatCategory {
    Normal,
    Suspicious,
    FlashLoan,
    Reentrancy,
    RugPull,
    LiquidityDrain,
    Sandwich,
    PriceManipulation,
    GovernanceExploit,
    Phishing,
    MaliciousContract,
    Unknown,
}

impl ThreatCategory {
    pub const ALL: [ThreatCategory; 12] = [
        ThreatCategory::Normal,
        ThreatCategory::Suspicious,
        ThreatCategory::FlashLoan,
        ThreatCategory::Reentrancy,
        ThreatCategory::RugPull,
        ThreatCategory::LiquidityDrain,
        ThreatCategory::Sandwich,
        ThreatCategory::PriceManipulation,
        ThreatCategory::GovernanceExploit,
        ThreatCategory::Phishing,
        ThreatCategory::MaliciousContract,
        ThreatCategory::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatCategory::Normal => "normal",
            ThreatCategory::Suspicious => "suspicious",
            ThreatCategory::FlashLoan => "flash_loan",
            ThreatCategory::Reentrancy => "reentrancy",
            ThreatCategory::RugPull => "rug_pull",
            ThreatCategory::LiquidityDrain => "liquidity_drain",
            ThreatCategory::Sandwich => "sandwich",
            ThreatCategory::PriceManipulation => "price_manipulation",
            ThreatCategory::GovernanceExploit => "governance_exploit",
            ThreatCategory::Phishing => "phishing",
            ThreatCategory::MaliciousContract => "malicious_contract",
            ThreatCategory::Unknown => "unknown",
        }
    }

    /// Human label, as shown on dashboards
    pub fn label(&self) -> &'static str {
        match self {
            ThreatCategory::Normal => "Normal Transaction",
            ThreatCategory::Suspicious => "Suspicious Activity",
            ThreatCategory::FlashLoan => "Flash Loan Attack",
            ThreatCategory::Reentrancy => "Reentrancy Attack",
            ThreatCategory::RugPull => "Rug Pull Attempt",
            ThreatCategory::LiquidityDrain => "Liquidity Drain",
            ThreatCategory::Sandwich => "Sandwich Attack",
            ThreatCategory::PriceManipulation => "Price Manipulation",
            ThreatCategory::GovernanceExploit => "Governance Exploit",
            ThreatCategory::Phishing => "Phishing",
            ThreatCategory::MaliciousContract => "Malicious Contract Interaction",
            ThreatCategory::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ThreatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accepts the snake_case names and the free-form labels scorers emit
/// ("Flash Loan Attack", "Normal Transaction", "rug-pull", ...)
impl FromStr for ThreatCategory {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let category = match key.as_str() {
            "normal" | "normaltransaction" | "normalswap" | "safe" | "safetransaction" => {
                ThreatCategory::Normal
            }
            "suspicious" | "suspiciousactivity" | "suspiciouspattern" | "highrisktransaction" => {
                ThreatCategory::Suspicious
            }
            "flashloan" | "flashloanattack" => ThreatCategory::FlashLoan,
            "reentrancy" | "reentrancyattack" => ThreatCategory::Reentrancy,
            "rugpull" | "rugpullattempt" => ThreatCategory::RugPull,
            "liquiditydrain" | "drainliquidity" => ThreatCategory::LiquidityDrain,
            "sandwich" | "sandwichattack" | "frontrunning" => ThreatCategory::Sandwich,
            "pricemanipulation" | "oraclemanipulation" => ThreatCategory::PriceManipulation,
            "governanceexploit" | "governanceattack" => ThreatCategory::GovernanceExploit,
            "phishing" => ThreatCategory::Phishing,
            "maliciouscontract" | "maliciouscontractinteraction" | "maliciousactivitydetected" => {
                ThreatCategory::MaliciousContract
            }
            "unknown" => ThreatCategory::Unknown,
            _ => {
                return Err(GuardError::InvalidInput(format!(
                    "unknown threat category '{}'",
                    s
                )))
            }
        };
        Ok(category)
    }
}

// ============================================================================
// VERDICT
// ============================================================================

/// Outcome of one assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approved,
    Blocked,
}

impl Verdict {
    pub fn from_score(score: u8, block_threshold: u8) -> Self {
        if score >= block_threshold {
            Verdict::Blocked
        } else {
            Verdict::Approved
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Blocked => "blocked",
        }
    }
}

// ============================================================================
// RISK ASSESSMENT
// ============================================================================

/// Latest verdict for one transaction id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub tx_id: TxId,
    /// 0 (benign) ..= 100 (certain exploit)
    pub risk_score: u8,
    pub category: ThreatCategory,
    pub submitted_by: Address,
    pub submitted_at: DateTime<Utc>,
    /// `risk_score >= block_threshold` at write time
    pub is_blocked: bool,
    /// Potential loss declared by the submitter, token units
    pub value_at_risk: u128,
    /// 1 on first write, +1 per re-assessment
    pub revision: u32,
}

impl RiskAssessment {
    pub fn verdict(&self) -> Verdict {
        if self.is_blocked {
            Verdict::Blocked
        } else {
            Verdict::Approved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_free_form_labels() {
        assert_eq!("Flash Loan Attack".parse::<ThreatCategory>().unwrap(), ThreatCategory::FlashLoan);
        assert_eq!("Normal Transaction".parse::<ThreatCategory>().unwrap(), ThreatCategory::Normal);
        assert_eq!("Rug Pull Attempt".parse::<ThreatCategory>().unwrap(), ThreatCategory::RugPull);
        assert_eq!("rug-pull".parse::<ThreatCategory>().unwrap(), ThreatCategory::RugPull);
        assert!("Definitely Fine".parse::<ThreatCategory>().is_err());
    }

    #[test]
    fn test_snake_case_names_roundtrip_through_from_str() {
        for category in ThreatCategory::ALL {
            assert_eq!(category.as_str().parse::<ThreatCategory>().unwrap(), category);
            assert_eq!(category.label().parse::<ThreatCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&ThreatCategory::PriceManipulation).unwrap();
        assert_eq!(json, "\"price_manipulation\"");
    }

    #[test]
    fn test_verdict_threshold_is_inclusive() {
        assert_eq!(Verdict::from_score(79, 80), Verdict::Approved);
        assert_eq!(Verdict::from_score(80, 80), Verdict::Blocked);
        assert_eq!(Verdict::from_score(100, 80), Verdict::Blocked);
    }
}
