//! Vault snapshots — capture the full accounting state at a point in time.
//!
//! Snapshots let an embedder persist and restore the vault without replaying
//! every operation. The snapshot hash is computed deterministically from the
//! accounting state so a restored copy can be verified against tampering.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};

use stew_types::{Address, Timestamp};

use crate::ledger::LagLedger;
use crate::shares::ShareBook;
use crate::state::VaultState;

/// A vault snapshot — the singleton state plus every share balance and
/// outstanding lag-ledger entry, in deterministic order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VaultSnapshot {
    /// Hash of this snapshot (Blake2b of the accounting fields).
    pub hash: [u8; 32],
    /// Timestamp when the snapshot was created. Not part of the hash.
    pub created_at: Timestamp,
    /// The vault's singleton accounting state.
    pub state: VaultState,
    /// (holder, balance), sorted by holder.
    pub share_balances: Vec<(Address, u128)>,
    /// (holder, epoch, weight), sorted by holder then epoch.
    pub lag_entries: Vec<(Address, u64, u128)>,
    /// Snapshot version for compatibility.
    pub version: u32,
}

impl VaultSnapshot {
    /// Capture a snapshot of the given accounting state.
    pub fn create(state: VaultState, shares: &ShareBook, ledger: &LagLedger, now: Timestamp) -> Self {
        let mut share_balances: Vec<(Address, u128)> =
            shares.iter().map(|(a, b)| (a.clone(), b)).collect();
        share_balances.sort();

        let mut lag_entries: Vec<(Address, u64, u128)> =
            ledger.iter().map(|(a, e, w)| (a.clone(), e, w)).collect();
        lag_entries.sort();

        let mut snap = Self {
            hash: [0u8; 32],
            created_at: now,
            state,
            share_balances,
            lag_entries,
            version: 1,
        };
        snap.hash = snap.compute_hash();
        snap
    }

    /// Compute the Blake2b-256 hash of this snapshot deterministically.
    fn compute_hash(&self) -> [u8; 32] {
        let mut hasher = Blake2b::<U32>::new();
        hasher.update(self.state.total_shares.to_le_bytes());
        hasher.update(self.state.total_lagged_mult.to_le_bytes());
        hasher.update(self.state.mint_epoch.to_le_bytes());
        hasher.update(self.state.last_mint_multiplier.to_le_bytes());
        hasher.update(self.state.last_mint_balance.to_le_bytes());
        hasher.update(self.state.last_mint_time.as_secs().to_le_bytes());
        for (holder, balance) in &self.share_balances {
            hasher.update(holder.as_str().as_bytes());
            hasher.update(balance.to_le_bytes());
        }
        for (holder, epoch, weight) in &self.lag_entries {
            hasher.update(holder.as_str().as_bytes());
            hasher.update(epoch.to_le_bytes());
            hasher.update(weight.to_le_bytes());
        }

        let result = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        out
    }

    /// Verify the snapshot hash matches the accounting data.
    pub fn verify(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Vec<u8> {
        bincode::serialize(self).expect("snapshot serialization should not fail")
    }

    /// Deserialize a snapshot from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, String> {
        bincode::deserialize(bytes).map_err(|e| e.to_string())
    }
}
