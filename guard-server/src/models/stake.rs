//! Validator stake models

use serde::Deserialize;
use validator::Validate;

/// Stake or unstake
#[derive(Debug, Deserialize, Validate)]
pub struct AmountRequest {
    pub amount: u128,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SlashRequest {
    pub amount: u128,
    #[validate(length(min = 1, max = 256))]
    pub reason: String,
}
