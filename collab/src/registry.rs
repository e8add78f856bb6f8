//! Gobbler custody registry trait.

use stew_types::{Address, GobblerId};

/// Custody and yield-weight registry for gobblers.
///
/// The registry owns the authoritative owner-of record; the vault never
/// tracks per-gobbler ownership itself.
pub trait GobblerRegistry {
    /// Move custody of `id` from `from` to `to`. Returns `false` if the
    /// registry rejects the transfer (wrong owner, unknown id, ...).
    fn transfer_gobbler(&mut self, from: &Address, to: &Address, id: GobblerId) -> bool;

    /// The yield multiplier of a single gobbler. Unknown ids report 0.
    fn gobbler_multiplier(&self, id: GobblerId) -> u128;

    /// The total yield multiplier across every gobbler held by `owner`.
    fn aggregate_multiplier(&self, owner: &Address) -> u128;
}
