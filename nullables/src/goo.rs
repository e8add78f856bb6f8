//! Nullable goo ledger — in-memory balances with a closed-form accrual.

use std::collections::HashMap;

use stew_collab::GooLedger;
use stew_types::Address;

/// An in-memory goo ledger for testing.
///
/// The accrual formula is the quadratic closed form
/// `g(t) = t²·m/4 + t·⌊√(m·g0)⌋ + g0` with `t` in whole days — deterministic,
/// integer-only, and monotone in the multiplier, which is all the vault
/// requires of the real formula.
#[derive(Default)]
pub struct NullGooLedger {
    balances: HashMap<Address, u128>,
    fail_transfers: bool,
}

impl NullGooLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an owner with a goo balance.
    pub fn set_balance(&mut self, owner: Address, amount: u128) {
        self.balances.insert(owner, amount);
    }

    /// Force every subsequent transfer to be rejected.
    pub fn set_fail_transfers(&mut self, fail: bool) {
        self.fail_transfers = fail;
    }
}

impl GooLedger for NullGooLedger {
    fn balance(&self, owner: &Address) -> u128 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    fn transfer_from(&mut self, from: &Address, to: &Address, amount: u128) -> bool {
        if self.fail_transfers {
            return false;
        }
        let Some(from_balance) = self.balances.get(from).copied() else {
            return amount == 0;
        };
        if from_balance < amount {
            return false;
        }
        self.balances.insert(from.clone(), from_balance - amount);
        *self.balances.entry(to.clone()).or_insert(0) += amount;
        true
    }

    fn accrued_balance(&self, multiplier: u128, base: u128, elapsed_days: u64) -> u128 {
        let t = elapsed_days as u128;
        t * t * multiplier / 4 + t * isqrt(multiplier * base) + base
    }
}

/// Integer square root, truncating (Newton's method).
fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let mut x = 1u128 << ((128 - n.leading_zeros()).div_ceil(2));
    loop {
        let next = (x + n / x) / 2;
        if next >= x {
            return x;
        }
        x = next;
    }
}
