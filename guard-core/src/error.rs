//! Guard errors
//!
//! Every failing operation returns one of these before touching state.

use thiserror::Error;

use crate::logic::access::Role;
use crate::primitives::{Address, TxId};

pub type GuardResult<T> = Result<T, GuardError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    // Authorization
    #[error("caller is not an active validator")]
    NotAuthorized,

    #[error("caller lacks the {role} role")]
    Unauthorized { role: Role },

    // Validation
    #[error("risk score {0} outside [0, 100]")]
    InvalidScore(i64),

    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("amount {requested} exceeds staked amount {staked}")]
    ExceedsStake { requested: u128, staked: u128 },

    #[error("insufficient token balance: required {required}, available {available}")]
    InsufficientBalance { required: u128, available: u128 },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("arithmetic overflow")]
    Overflow,

    // Lookups
    #[error("protocol {0} is not registered")]
    ProtocolNotFound(Address),

    // Gate
    #[error("transaction {0} is not cleared by the guard")]
    TransactionBlocked(TxId),

    // External dependency
    #[error("token transfer rejected")]
    TransferFailed,
}

impl GuardError {
    /// Stable machine-readable code, surfaced verbatim to API clients
    pub fn code(&self) -> &'static str {
        match self {
            GuardError::NotAuthorized => "not_authorized",
            GuardError::Unauthorized { .. } => "unauthorized",
            GuardError::InvalidScore(_) => "invalid_score",
            GuardError::InvalidAmount => "invalid_amount",
            GuardError::ExceedsStake { .. } => "exceeds_stake",
            GuardError::InsufficientBalance { .. } => "insufficient_balance",
            GuardError::InvalidInput(_) => "invalid_input",
            GuardError::Overflow => "overflow",
            GuardError::ProtocolNotFound(_) => "protocol_not_found",
            GuardError::TransactionBlocked(_) => "transaction_blocked",
            GuardError::TransferFailed => "transfer_failed",
        }
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, GuardError::NotAuthorized | GuardError::Unauthorized { .. })
    }
}
