//! External collaborator traits for the STEW vault.
//!
//! The vault engine treats gobbler custody, the goo balance, and the minting
//! mechanism as opaque services. Every backend (live chain adapter,
//! in-memory nullable for testing) implements these traits; the engine
//! depends only on the traits.
//!
//! All calls are synchronous and failable-but-atomic: a `false` return means
//! the collaborator rejected the call and left its own state untouched.

pub mod goo;
pub mod mint;
pub mod registry;

pub use goo::GooLedger;
pub use mint::MintService;
pub use registry::GobblerRegistry;
