//! Vault-specific errors.
//!
//! Every failure aborts the enclosing operation with no partial state
//! mutation; the vault never retries a rejected collaborator call.

use stew_types::{Address, GobblerId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("custody transfer of {id} from {from} to {to} was rejected")]
    CustodyTransferFailed {
        id: GobblerId,
        from: Address,
        to: Address,
    },

    #[error("goo deposit of {needed} was rejected by the balance service")]
    BalanceDepositFailed { needed: u128 },

    #[error("no mint event has occurred yet")]
    NoMintEventYet,

    #[error("epoch {epoch} has not been settled by a later mint (current epoch {current})")]
    EpochNotYetSettled { epoch: u64, current: u64 },

    #[error("insufficient lagged weight: need {needed}, recorded {recorded}")]
    InsufficientLedgerBalance { needed: u128, recorded: u128 },

    #[error("insufficient shares: need {needed}, available {available}")]
    InsufficientShares { needed: u128, available: u128 },

    #[error("mint was rejected by the minting service")]
    MintFailed,

    #[error("snapshot hash does not match its contents")]
    SnapshotCorrupt,

    #[error("arithmetic overflow in vault computation")]
    Overflow,
}
