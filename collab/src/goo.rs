//! Goo balance service trait.

use stew_types::Address;

/// The fungible goo balance and its accrual formula.
///
/// Balances grow continuously as a function of the holder's aggregate
/// multiplier and elapsed time; the closed-form formula lives entirely
/// behind [`GooLedger::accrued_balance`] and the vault only requires it to
/// be deterministic and monotone in the multiplier.
pub trait GooLedger {
    /// Current goo balance of `owner`.
    fn balance(&self, owner: &Address) -> u128;

    /// Move `amount` of goo from `from` to `to`. Returns `false` if the
    /// ledger rejects the transfer (insufficient balance, ...).
    fn transfer_from(&mut self, from: &Address, to: &Address, amount: u128) -> bool;

    /// The balance a holder with `multiplier` and starting balance `base`
    /// accrues to after `elapsed_days` whole days.
    fn accrued_balance(&self, multiplier: u128, base: u128, elapsed_days: u64) -> u128;
}
