//! Identity & Stake Registry
//!
//! - `types` - validator record and plans
//! - `registry` - validation (plan) and commit phases

pub mod types;
pub mod registry;

pub use types::*;
pub use registry::StakeRegistry;
