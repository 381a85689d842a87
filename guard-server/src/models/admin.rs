//! Roles, dev tokens, faucet

use chrono::{DateTime, Utc};
use guard_core::{Address, Role};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RoleRequest {
    pub address: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub address: Address,
    pub role: Role,
    pub changed: bool,
    pub roles: Vec<Role>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DevTokenRequest {
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct DevTokenResponse {
    pub token: String,
    pub address: Address,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FaucetRequest {
    pub amount: Option<u128>,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub address: Address,
    pub balance: u128,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    pub limit: Option<usize>,
}
