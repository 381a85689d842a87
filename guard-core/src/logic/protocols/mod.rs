//! Protocol Registry
//!
//! Consumer contracts that opted into gate enforcement. Informational:
//! the gate does not require a protocol to be registered.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_PROTOCOL_NAME_LEN;
use crate::error::{GuardError, GuardResult};
use crate::primitives::Address;

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolKind {
    Dex,
    Lending,
    Bridge,
    Yield,
    Nft,
    Other,
}

impl ProtocolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolKind::Dex => "dex",
            ProtocolKind::Lending => "lending",
            ProtocolKind::Bridge => "bridge",
            ProtocolKind::Yield => "yield",
            ProtocolKind::Nft => "nft",
            ProtocolKind::Other => "other",
        }
    }
}

impl fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProtocolKind {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dex" | "amm" => Ok(ProtocolKind::Dex),
            "lending" => Ok(ProtocolKind::Lending),
            "bridge" => Ok(ProtocolKind::Bridge),
            "yield" | "vault" => Ok(ProtocolKind::Yield),
            "nft" => Ok(ProtocolKind::Nft),
            "other" => Ok(ProtocolKind::Other),
            other => Err(GuardError::InvalidInput(format!("unknown protocol kind '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolEntry {
    pub address: Address,
    pub name: String,
    pub kind: ProtocolKind,
    pub is_active: bool,
    pub registered_at: DateTime<Utc>,
    pub deactivated_at: Option<DateTime<Utc>>,
}

/// What a `register` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Registration {
    /// First time this address was seen
    Registered,
    /// Already active, metadata refreshed
    Updated,
    /// Was deactivated, active again
    Reactivated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegistryStats {
    pub total_protocols: u64,
    pub active_protocols: u64,
}

// ============================================================================
// REGISTRY
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ProtocolRegistry {
    entries: HashMap<Address, ProtocolEntry>,
    stats: RegistryStats,
}

pub fn validate_name(name: &str) -> GuardResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GuardError::InvalidInput("protocol name cannot be empty".to_string()));
    }
    if name.chars().count() > MAX_PROTOCOL_NAME_LEN {
        return Err(GuardError::InvalidInput(format!(
            "protocol name longer than {} characters",
            MAX_PROTOCOL_NAME_LEN
        )));
    }
    Ok(name.to_string())
}

impl ProtocolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        address: Address,
        name: &str,
        kind: ProtocolKind,
        now: DateTime<Utc>,
    ) -> GuardResult<(ProtocolEntry, Registration)> {
        let name = validate_name(name)?;

        let outcome = match self.entries.get_mut(&address) {
            Some(entry) => {
                entry.name = name;
                entry.kind = kind;
                if entry.is_active {
                    Registration::Updated
                } else {
                    entry.is_active = true;
                    entry.deactivated_at = None;
                    self.stats.active_protocols += 1;
                    Registration::Reactivated
                }
            }
            None => {
                self.entries.insert(
                    address,
                    ProtocolEntry {
                        address,
                        name,
                        kind,
                        is_active: true,
                        registered_at: now,
                        deactivated_at: None,
                    },
                );
                self.stats.total_protocols += 1;
                self.stats.active_protocols += 1;
                Registration::Registered
            }
        };

        let entry = self.entries[&address].clone();
        log::info!("Protocol {} '{}' {:?}", address, entry.name, outcome);
        Ok((entry, outcome))
    }

    /// Returns false if the protocol was already inactive
    pub fn deactivate(&mut self, address: &Address, now: DateTime<Utc>) -> GuardResult<bool> {
        let entry = self
            .entries
            .get_mut(address)
            .ok_or(GuardError::ProtocolNotFound(*address))?;
        if !entry.is_active {
            return Ok(false);
        }
        entry.is_active = false;
        entry.deactivated_at = Some(now);
        self.stats.active_protocols = self.stats.active_protocols.saturating_sub(1);
        log::info!("Protocol {} deactivated", address);
        Ok(true)
    }

    pub fn is_active(&self, address: &Address) -> bool {
        self.entries.get(address).is_some_and(|e| e.is_active)
    }

    pub fn get(&self, address: &Address) -> Option<&ProtocolEntry> {
        self.entries.get(address)
    }

    pub fn stats(&self) -> RegistryStats {
        self.stats
    }

    /// Oldest registration first
    pub fn list(&self, active_only: bool) -> Vec<ProtocolEntry> {
        let mut list: Vec<ProtocolEntry> = self
            .entries
            .values()
            .filter(|e| !active_only || e.is_active)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.registered_at.cmp(&b.registered_at).then(a.address.cmp(&b.address)));
        list
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const DEX: Address = Address::from_low_u64(0xDE);
    const LEND: Address = Address::from_low_u64(0x1E);

    #[test]
    fn test_register_counts_once() {
        let mut reg = ProtocolRegistry::new();
        let (_, outcome) = reg.register(DEX, "Protected DEX Demo", ProtocolKind::Dex, Utc::now()).unwrap();
        assert_eq!(outcome, Registration::Registered);

        let (entry, outcome) = reg.register(DEX, "Protected DEX v2", ProtocolKind::Dex, Utc::now()).unwrap();
        assert_eq!(outcome, Registration::Updated);
        assert_eq!(entry.name, "Protected DEX v2");

        assert_eq!(reg.stats(), RegistryStats { total_protocols: 1, active_protocols: 1 });
        assert!(reg.is_active(&DEX));
    }

    #[test]
    fn test_deactivate_and_reactivate() {
        let mut reg = ProtocolRegistry::new();
        reg.register(DEX, "DEX", ProtocolKind::Dex, Utc::now()).unwrap();
        reg.register(LEND, "Lender", ProtocolKind::Lending, Utc::now()).unwrap();

        assert!(reg.deactivate(&DEX, Utc::now()).unwrap());
        assert!(!reg.deactivate(&DEX, Utc::now()).unwrap());
        assert_eq!(reg.stats(), RegistryStats { total_protocols: 2, active_protocols: 1 });
        assert!(reg.get(&DEX).unwrap().deactivated_at.is_some());

        let (_, outcome) = reg.register(DEX, "DEX", ProtocolKind::Dex, Utc::now()).unwrap();
        assert_eq!(outcome, Registration::Reactivated);
        assert_eq!(reg.stats(), RegistryStats { total_protocols: 2, active_protocols: 2 });
    }

    #[test]
    fn test_deactivate_unknown() {
        let mut reg = ProtocolRegistry::new();
        assert_eq!(
            reg.deactivate(&DEX, Utc::now()),
            Err(GuardError::ProtocolNotFound(DEX))
        );
    }

    #[test]
    fn test_name_validation() {
        let mut reg = ProtocolRegistry::new();
        assert!(reg.register(DEX, "   ", ProtocolKind::Dex, Utc::now()).is_err());
        assert!(reg.register(DEX, &"x".repeat(65), ProtocolKind::Dex, Utc::now()).is_err());
        assert_eq!(reg.stats(), RegistryStats::default());
    }

    #[test]
    fn test_list_active_only() {
        let mut reg = ProtocolRegistry::new();
        reg.register(DEX, "DEX", ProtocolKind::Dex, Utc::now()).unwrap();
        reg.register(LEND, "Lender", ProtocolKind::Lending, Utc::now()).unwrap();
        reg.deactivate(&LEND, Utc::now()).unwrap();

        assert_eq!(reg.list(false).len(), 2);
        let active = reg.list(true);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].address, DEX);
    }
}
