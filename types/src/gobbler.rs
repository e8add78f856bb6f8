//! Gobbler identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The identifier of a single gobbler in the custody registry.
///
/// Identifiers are assigned by the registry; the vault never invents them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GobblerId(u64);

impl GobblerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GobblerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gobbler #{}", self.0)
    }
}

impl From<u64> for GobblerId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}
