//! Central Configuration Constants
//!
//! Single source of truth for guard defaults.

use crate::primitives::Address;

/// Minimum stake (token units) for a validator to submit assessments
pub const DEFAULT_MIN_STAKE: u128 = 1_000;

/// Scores at or above this are blocked
pub const DEFAULT_BLOCK_THRESHOLD: u8 = 80;

/// Highest accepted risk score
pub const MAX_RISK_SCORE: u8 = 100;

/// Events kept in memory for `/events`
pub const DEFAULT_EVENT_HISTORY_LIMIT: usize = 1_000;

/// Longest protocol display name
pub const MAX_PROTOCOL_NAME_LEN: usize = 64;

/// Owner authority when none is configured
pub const DEFAULT_AUTHORITY_ADDRESS: Address = Address::from_low_u64(0xA117);

/// Account holding staked collateral
pub const DEFAULT_CUSTODY_ADDRESS: Address = Address::from_low_u64(0x6A5D);

/// Account receiving slashed collateral
pub const DEFAULT_TREASURY_ADDRESS: Address = Address::from_low_u64(0x7EA5);

/// Crate version
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");
