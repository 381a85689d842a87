//! HTTP handlers

use guard_core::{Address, GuardError, ThreatCategory, TxId};

use crate::AppResult;

pub mod health;
pub mod auth;
pub mod validators;
pub mod assessments;
pub mod gate;
pub mod protocols;
pub mod stats;
pub mod contracts;
pub mod exploits;
pub mod roles;
pub mod events;
pub mod token;
pub mod analyze;

pub(crate) fn parse_address(raw: &str) -> AppResult<Address> {
    Ok(raw.trim().parse::<Address>()?)
}

pub(crate) fn parse_tx_id(raw: &str) -> AppResult<TxId> {
    Ok(raw.trim().parse::<TxId>()?)
}

pub(crate) fn parse_category(raw: &str) -> AppResult<ThreatCategory> {
    Ok(raw.parse::<ThreatCategory>()?)
}

/// Negative or oversized scores surface as `invalid_score`, same as > 100
pub(crate) fn parse_score(raw: i64) -> AppResult<u32> {
    u32::try_from(raw).map_err(|_| GuardError::InvalidScore(raw).into())
}
