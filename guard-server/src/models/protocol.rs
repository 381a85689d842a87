//! Protocol registry models

use guard_core::{Address, ProtocolEntry, Registration};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterProtocolRequest {
    pub address: String,
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterProtocolResponse {
    pub protocol: ProtocolEntry,
    pub outcome: Registration,
}

#[derive(Debug, Serialize)]
pub struct DeactivateProtocolResponse {
    pub address: Address,
    /// False when the protocol was already inactive
    pub deactivated: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProtocolListQuery {
    pub active_only: Option<bool>,
}
