//! Per-holder share balances.
//!
//! The share token's transfer/allowance machinery is external; the vault
//! only needs mint/burn bookkeeping so that the tax split stays
//! individually auditable.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use stew_types::Address;

use crate::error::VaultError;

/// Per-holder share balances (raw, 18 decimals).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ShareBook {
    balances: HashMap<Address, u128>,
}

impl ShareBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current share balance of `holder`.
    pub fn balance_of(&self, holder: &Address) -> u128 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    /// Issue `amount` shares to `holder`.
    pub fn mint(&mut self, holder: &Address, amount: u128) -> Result<(), VaultError> {
        let balance = self.balances.entry(holder.clone()).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(VaultError::Overflow)?;
        Ok(())
    }

    /// Burn `amount` shares from `holder`. Fails hard on overdraft.
    pub fn burn(&mut self, holder: &Address, amount: u128) -> Result<(), VaultError> {
        let available = self.balance_of(holder);
        if available < amount {
            return Err(VaultError::InsufficientShares {
                needed: amount,
                available,
            });
        }
        if available == amount {
            self.balances.remove(holder);
        } else {
            self.balances.insert(holder.clone(), available - amount);
        }
        Ok(())
    }

    /// Sum of every holder's balance. Equals `VaultState::total_shares` at
    /// all times; property tests check the two against each other.
    pub fn total_issued(&self) -> u128 {
        self.balances.values().sum()
    }

    /// Iterate over (holder, balance) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&Address, u128)> {
        self.balances.iter().map(|(a, b)| (a, *b))
    }
}
