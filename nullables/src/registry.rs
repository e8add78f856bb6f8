//! Nullable gobbler registry — in-memory custody and multipliers.

use std::collections::HashMap;

use stew_collab::GobblerRegistry;
use stew_types::{Address, GobblerId};

/// An in-memory custody registry for testing.
///
/// Gobblers are seeded with [`NullGobblerRegistry::add_gobbler`]; transfers
/// verify the `from` owner like a real registry would. Setting
/// `fail_transfers` makes every transfer report failure without mutating
/// ownership, which exercises the vault's rollback paths.
#[derive(Default)]
pub struct NullGobblerRegistry {
    owners: HashMap<GobblerId, Address>,
    multipliers: HashMap<GobblerId, u128>,
    fail_transfers: bool,
}

impl NullGobblerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a gobbler with an owner and a yield multiplier.
    pub fn add_gobbler(&mut self, id: GobblerId, owner: Address, multiplier: u128) {
        self.owners.insert(id, owner);
        self.multipliers.insert(id, multiplier);
    }

    /// Force every subsequent transfer to be rejected.
    pub fn set_fail_transfers(&mut self, fail: bool) {
        self.fail_transfers = fail;
    }

    /// Current owner of a gobbler, if known.
    pub fn owner_of(&self, id: GobblerId) -> Option<&Address> {
        self.owners.get(&id)
    }
}

impl GobblerRegistry for NullGobblerRegistry {
    fn transfer_gobbler(&mut self, from: &Address, to: &Address, id: GobblerId) -> bool {
        if self.fail_transfers {
            return false;
        }
        match self.owners.get_mut(&id) {
            Some(owner) if *owner == *from => {
                *owner = to.clone();
                true
            }
            _ => false,
        }
    }

    fn gobbler_multiplier(&self, id: GobblerId) -> u128 {
        self.multipliers.get(&id).copied().unwrap_or(0)
    }

    fn aggregate_multiplier(&self, owner: &Address) -> u128 {
        self.owners
            .iter()
            .filter(|(_, o)| *o == owner)
            .map(|(id, _)| self.multipliers.get(id).copied().unwrap_or(0))
            .sum()
    }
}
