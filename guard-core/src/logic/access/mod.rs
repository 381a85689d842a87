//! Access Control
//!
//! Roles are explicit grants held by addresses. The owner authority
//! implicitly holds every role and is the only one allowed to grant.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GuardError, GuardResult};
use crate::primitives::Address;

/// Privileged capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// May slash validator stake
    Slasher,
    /// May register and deactivate protocols
    RegistryAdmin,
    /// May update contract risk scores and record prevented exploits
    Oracle,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Slasher, Role::RegistryAdmin, Role::Oracle];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Slasher => "slasher",
            Role::RegistryAdmin => "registry_admin",
            Role::Oracle => "oracle",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct AccessControl {
    owner: Address,
    grants: HashMap<Address, HashSet<Role>>,
}

impl AccessControl {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            grants: HashMap::new(),
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn has_role(&self, who: &Address, role: Role) -> bool {
        *who == self.owner || self.grants.get(who).is_some_and(|roles| roles.contains(&role))
    }

    /// Fails with `Unauthorized` unless `who` holds `role`
    pub fn require(&self, who: &Address, role: Role) -> GuardResult<()> {
        if !self.has_role(who, role) {
            log::warn!("Role '{}' required but {} does not hold it", role, who);
            return Err(GuardError::Unauthorized { role });
        }
        Ok(())
    }

    fn require_owner(&self, caller: &Address, role: Role) -> GuardResult<()> {
        if *caller != self.owner {
            log::warn!("Only the owner may change role '{}', caller {}", role, caller);
            return Err(GuardError::Unauthorized { role });
        }
        Ok(())
    }

    /// Returns true if the grant is new
    pub fn grant(&mut self, caller: &Address, who: Address, role: Role) -> GuardResult<bool> {
        self.require_owner(caller, role)?;
        Ok(self.grants.entry(who).or_default().insert(role))
    }

    /// Returns true if a grant was removed
    pub fn revoke(&mut self, caller: &Address, who: &Address, role: Role) -> GuardResult<bool> {
        self.require_owner(caller, role)?;
        let removed = match self.grants.get_mut(who) {
            Some(roles) => roles.remove(&role),
            None => false,
        };
        if self.grants.get(who).is_some_and(|roles| roles.is_empty()) {
            self.grants.remove(who);
        }
        Ok(removed)
    }

    pub fn roles_of(&self, who: &Address) -> Vec<Role> {
        if *who == self.owner {
            return Role::ALL.to_vec();
        }
        let mut roles: Vec<Role> = self
            .grants
            .get(who)
            .map(|r| r.iter().copied().collect())
            .unwrap_or_default();
        roles.sort_by_key(|r| r.as_str());
        roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: Address = Address::from_low_u64(1);
    const ALICE: Address = Address::from_low_u64(2);

    #[test]
    fn test_owner_holds_every_role() {
        let acl = AccessControl::new(OWNER);
        for role in Role::ALL {
            assert!(acl.has_role(&OWNER, role));
            assert!(acl.require(&OWNER, role).is_ok());
        }
        assert_eq!(acl.roles_of(&OWNER).len(), 3);
    }

    #[test]
    fn test_grant_and_revoke() {
        let mut acl = AccessControl::new(OWNER);
        assert!(!acl.has_role(&ALICE, Role::Slasher));

        assert!(acl.grant(&OWNER, ALICE, Role::Slasher).unwrap());
        assert!(!acl.grant(&OWNER, ALICE, Role::Slasher).unwrap());
        assert!(acl.has_role(&ALICE, Role::Slasher));
        assert!(!acl.has_role(&ALICE, Role::Oracle));

        assert!(acl.revoke(&OWNER, &ALICE, Role::Slasher).unwrap());
        assert!(!acl.has_role(&ALICE, Role::Slasher));
        assert!(acl.roles_of(&ALICE).is_empty());
    }

    #[test]
    fn test_non_owner_cannot_grant() {
        let mut acl = AccessControl::new(OWNER);
        let err = acl.grant(&ALICE, ALICE, Role::Oracle).unwrap_err();
        assert_eq!(err, GuardError::Unauthorized { role: Role::Oracle });
        assert!(!acl.has_role(&ALICE, Role::Oracle));
    }

    #[test]
    fn test_require_reports_missing_role() {
        let acl = AccessControl::new(OWNER);
        assert_eq!(
            acl.require(&ALICE, Role::RegistryAdmin),
            Err(GuardError::Unauthorized { role: Role::RegistryAdmin })
        );
    }
}
