//! STEW vault core — the share accounting engine and lagged deposit ledger.
//!
//! The vault aggregates gobblers, issues fungible shares proportional to
//! each deposited gobbler's yield multiplier, and reinvests its pooled goo
//! balance into minting new gobblers.
//!
//! This crate handles:
//! - Conversion-rate computation (shares per unit of multiplier-weight)
//! - Normal deposits/withdrawals with goo-debt collection and tax split
//! - Lagged deposits settled at a later mint epoch
//! - Mint-epoch advancement and last-mint snapshotting
//! - Deterministic state snapshots for persistence
//!
//! Custody, the goo accrual formula, and the minting mechanism are external
//! collaborators behind the `stew-collab` traits.

pub mod engine;
pub mod error;
pub mod ledger;
pub mod shares;
pub mod snapshot;
pub mod state;

pub use engine::VaultEngine;
pub use error::VaultError;
pub use ledger::LagLedger;
pub use shares::ShareBook;
pub use snapshot::VaultSnapshot;
pub use state::VaultState;
