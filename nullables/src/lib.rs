//! Nullable collaborators for deterministic testing.
//!
//! All three external dependencies of the vault (gobbler custody, goo
//! balance, minting) are abstracted behind the `stew-collab` traits. This
//! crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically (including forced failures)
//! - Never touch the filesystem or network
//!
//! Usage: swap real chain adapters for nullables in tests.

pub mod goo;
pub mod mint;
pub mod registry;

pub use goo::NullGooLedger;
pub use mint::NullMintService;
pub use registry::NullGobblerRegistry;
