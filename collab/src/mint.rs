//! Minting service trait.

use stew_types::GobblerId;

/// The mechanism that converts pooled goo into freshly minted gobblers.
pub trait MintService {
    /// Mint a new gobbler paying at most `max_price` goo from the caller's
    /// pooled balance. `use_pooled_balance` selects the virtual (pooled)
    /// balance over a token balance. Returns `false` if the mint is
    /// rejected (price too high, supply exhausted, ...).
    fn mint_from_balance(&mut self, max_price: u128, use_pooled_balance: bool) -> bool;

    /// Legendary-tier batch mint, forwarded verbatim. Returns `false` if
    /// the underlying mint is rejected.
    fn mint_batch(&mut self, ids: &[GobblerId]) -> bool;
}
