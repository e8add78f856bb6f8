//! The vault's singleton accounting state.

use serde::{Deserialize, Serialize};
use stew_types::Timestamp;

/// The vault's process-wide accounting state, mutated only by
/// [`crate::VaultEngine`] operations.
///
/// Created once at deployment and alive for the vault's lifetime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultState {
    /// Total fungible shares outstanding (raw, 18 decimals).
    pub total_shares: u128,

    /// Sum of multiplier-weight sitting in the lag ledger, PRECISION-scaled.
    /// Subtracted from the live denominator so lagged depositors do not
    /// dilute existing holders before their shares are minted.
    pub total_lagged_mult: u128,

    /// Monotonically increasing mint-event counter, starting at 0.
    pub mint_epoch: u64,

    /// Vault aggregate multiplier at the most recent mint event.
    pub last_mint_multiplier: u128,

    /// Vault goo balance at the most recent mint event.
    pub last_mint_balance: u128,

    /// Time of the most recent mint event.
    pub last_mint_time: Timestamp,
}

impl VaultState {
    pub fn new() -> Self {
        Self {
            total_shares: 0,
            total_lagged_mult: 0,
            mint_epoch: 0,
            last_mint_multiplier: 0,
            last_mint_balance: 0,
            last_mint_time: Timestamp::EPOCH,
        }
    }

    /// Whether at least one mint event has occurred. Before the first mint
    /// there is no multiplier baseline: deposits are goo-fee-exempt and lag
    /// deposits are rejected.
    pub fn has_minted(&self) -> bool {
        self.mint_epoch > 0
    }
}

impl Default for VaultState {
    fn default() -> Self {
        Self::new()
    }
}
