//! Transaction Guard Core
//!
//! Stake-backed validators assess pending transactions; dependent
//! contracts ask the gate whether a transaction may proceed.

pub mod constants;
pub mod error;
pub mod logic;
pub mod primitives;

pub use error::{GuardError, GuardResult};
pub use logic::access::Role;
pub use logic::events::{EventKind, GuardEvent, JournalRecorder};
pub use logic::gate::{GatePolicy, GateState};
pub use logic::guard::{GuardConfig, SharedGuard, SubmitReceipt, TransactionGuard};
pub use logic::ledger::{ContractRisk, RiskAssessment, ThreatCategory, Verdict};
pub use logic::protocols::{ProtocolEntry, ProtocolKind, Registration, RegistryStats};
pub use logic::scorer::{HeuristicScorer, RiskScorer, ScoreVerdict, TransactionProfile};
pub use logic::stake::ValidatorInfo;
pub use logic::stats::{CountingMode, FirewallReport, FirewallStats};
pub use logic::token::{InMemoryToken, TokenLedger};
pub use primitives::{Address, TxId};
