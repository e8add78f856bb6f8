//! The lagged deposit ledger.
//!
//! Records deposits made without immediate goo settlement, keyed by
//! (depositor, mint epoch at deposit time). Entries are additive, zeroed on
//! claim, and debited hard — over-debits fail, never clamp or wrap.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use stew_types::Address;

use crate::error::VaultError;

/// PRECISION-scaled multiplier-weight owed per (depositor, epoch).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LagLedger {
    entries: HashMap<(Address, u64), u128>,
}

impl LagLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded weight for (`holder`, `epoch`). Absent entries read as 0.
    pub fn entry(&self, holder: &Address, epoch: u64) -> u128 {
        self.entries.get(&(holder.clone(), epoch)).copied().unwrap_or(0)
    }

    /// Add `weight` to (`holder`, `epoch`). Multiple deposits in the same
    /// epoch accumulate.
    pub fn credit(&mut self, holder: &Address, epoch: u64, weight: u128) -> Result<(), VaultError> {
        let entry = self.entries.entry((holder.clone(), epoch)).or_insert(0);
        *entry = entry.checked_add(weight).ok_or(VaultError::Overflow)?;
        Ok(())
    }

    /// Remove `weight` from (`holder`, `epoch`). Fails hard on over-debit.
    pub fn debit(&mut self, holder: &Address, epoch: u64, weight: u128) -> Result<(), VaultError> {
        let recorded = self.entry(holder, epoch);
        if recorded < weight {
            return Err(VaultError::InsufficientLedgerBalance {
                needed: weight,
                recorded,
            });
        }
        if recorded == weight {
            self.entries.remove(&(holder.clone(), epoch));
        } else {
            self.entries.insert((holder.clone(), epoch), recorded - weight);
        }
        Ok(())
    }

    /// Read and zero the entry for (`holder`, `epoch`). Absent entries
    /// yield 0.
    pub fn take(&mut self, holder: &Address, epoch: u64) -> u128 {
        self.entries.remove(&(holder.clone(), epoch)).unwrap_or(0)
    }

    /// Sum of every outstanding entry. Equals
    /// `VaultState::total_lagged_mult` at all times; property tests check
    /// the two against each other.
    pub fn outstanding_total(&self) -> u128 {
        self.entries.values().sum()
    }

    /// Iterate over (holder, epoch, weight) in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&Address, u64, u128)> {
        self.entries.iter().map(|((a, e), w)| (a, *e, *w))
    }
}
