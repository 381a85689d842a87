//! Collateral Token
//!
//! The stake registry never moves tokens itself. It produces a
//! `PendingTransfer`, the guard executes it against a `TokenLedger`, and
//! local state is committed only after the ledger accepts it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{GuardError, GuardResult};
use crate::primitives::Address;

/// Fungible token interface consumed by the stake registry
pub trait TokenLedger {
    fn balance_of(&self, who: &Address) -> u128;

    /// Move `amount` from `from` to `to`. `false` means the token rejected it.
    fn transfer(&mut self, from: &Address, to: &Address, amount: u128) -> bool;
}

/// A validated transfer that has not been executed yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransfer {
    pub from: Address,
    pub to: Address,
    pub amount: u128,
}

impl PendingTransfer {
    /// Phase two: run against the token. Nothing else is mutated here.
    pub fn execute<T: TokenLedger + ?Sized>(&self, token: &mut T) -> GuardResult<()> {
        if token.transfer(&self.from, &self.to, self.amount) {
            Ok(())
        } else {
            log::warn!(
                "Token rejected transfer of {} from {} to {}",
                self.amount, self.from, self.to
            );
            Err(GuardError::TransferFailed)
        }
    }
}

/// In-memory collateral token (the demo's mock BDAG)
#[derive(Debug, Clone, Default)]
pub struct InMemoryToken {
    balances: HashMap<Address, u128>,
    total_supply: u128,
    paused: bool,
}

impl InMemoryToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self, to: Address, amount: u128) -> GuardResult<()> {
        let supply = self.total_supply.checked_add(amount).ok_or(GuardError::Overflow)?;
        let balance = self.balance_of(&to).checked_add(amount).ok_or(GuardError::Overflow)?;
        self.total_supply = supply;
        self.balances.insert(to, balance);
        log::debug!("Minted {} to {}", amount, to);
        Ok(())
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// While paused every transfer is rejected
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}

impl TokenLedger for InMemoryToken {
    fn balance_of(&self, who: &Address) -> u128 {
        self.balances.get(who).copied().unwrap_or(0)
    }

    fn transfer(&mut self, from: &Address, to: &Address, amount: u128) -> bool {
        if self.paused {
            return false;
        }
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return false;
        }
        if from == to {
            return true;
        }
        let Some(to_balance) = self.balance_of(to).checked_add(amount) else {
            return false;
        };
        self.balances.insert(*from, from_balance - amount);
        self.balances.insert(*to, to_balance);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Address = Address::from_low_u64(0xA);
    const B: Address = Address::from_low_u64(0xB);

    #[test]
    fn test_mint_and_transfer() {
        let mut token = InMemoryToken::new();
        token.mint(A, 500).unwrap();
        assert_eq!(token.total_supply(), 500);

        assert!(token.transfer(&A, &B, 200));
        assert_eq!(token.balance_of(&A), 300);
        assert_eq!(token.balance_of(&B), 200);
        assert_eq!(token.total_supply(), 500);
    }

    #[test]
    fn test_transfer_over_balance_rejected() {
        let mut token = InMemoryToken::new();
        token.mint(A, 10).unwrap();
        assert!(!token.transfer(&A, &B, 11));
        assert_eq!(token.balance_of(&A), 10);
        assert_eq!(token.balance_of(&B), 0);
    }

    #[test]
    fn test_paused_token_rejects() {
        let mut token = InMemoryToken::new();
        token.mint(A, 10).unwrap();
        token.set_paused(true);

        let pending = PendingTransfer { from: A, to: B, amount: 5 };
        assert_eq!(pending.execute(&mut token), Err(GuardError::TransferFailed));
        assert_eq!(token.balance_of(&A), 10);

        token.set_paused(false);
        assert!(pending.execute(&mut token).is_ok());
        assert_eq!(token.balance_of(&B), 5);
    }

    #[test]
    fn test_mint_overflow() {
        let mut token = InMemoryToken::new();
        token.mint(A, u128::MAX).unwrap();
        assert_eq!(token.mint(B, 1), Err(GuardError::Overflow));
        assert_eq!(token.balance_of(&B), 0);
    }
}
