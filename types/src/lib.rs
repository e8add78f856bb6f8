//! Fundamental types for the STEW gobbler vault.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: holder addresses, gobbler identifiers, timestamps, and the
//! vault's fixed-point parameters.

pub mod address;
pub mod gobbler;
pub mod params;
pub mod time;

pub use address::Address;
pub use gobbler::GobblerId;
pub use params::{VaultParams, DAY_SECS, PRECISION, SHARE_UNIT};
pub use time::Timestamp;
