//! Logic Module - Guard state & engines
//!
//! ## Layout
//! - `stake/` - validator identity and collateral
//! - `ledger/` - per-transaction assessments, per-contract scores
//! - `gate` - allow/deny predicate for dependent consumers
//! - `protocols/` - guarded protocol registry
//! - `stats/` - firewall counters
//! - `access/` - roles held by addresses
//! - `token/` - collateral token interface
//! - `scorer/` - offline heuristic risk scoring
//! - `events/` - event history and JSONL journal
//! - `guard` - the core state tying them together

pub mod access;
pub mod events;
pub mod gate;
pub mod guard;
pub mod ledger;
pub mod protocols;
pub mod scorer;
pub mod stake;
pub mod stats;
pub mod token;
