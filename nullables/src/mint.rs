//! Nullable mint service — records every mint request.

use stew_collab::MintService;
use stew_types::GobblerId;

/// An in-memory mint service for testing.
///
/// Records each call so tests can assert on the forwarded arguments, and
/// can be forced to reject mints.
#[derive(Default)]
pub struct NullMintService {
    /// Every `mint_from_balance` call: (max_price, use_pooled_balance).
    pub mints: Vec<(u128, bool)>,
    /// Every `mint_batch` call, verbatim.
    pub batches: Vec<Vec<GobblerId>>,
    fail_mints: bool,
}

impl NullMintService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force every subsequent mint to be rejected.
    pub fn set_fail_mints(&mut self, fail: bool) {
        self.fail_mints = fail;
    }
}

impl MintService for NullMintService {
    fn mint_from_balance(&mut self, max_price: u128, use_pooled_balance: bool) -> bool {
        if self.fail_mints {
            return false;
        }
        self.mints.push((max_price, use_pooled_balance));
        true
    }

    fn mint_batch(&mut self, ids: &[GobblerId]) -> bool {
        if self.fail_mints {
            return false;
        }
        self.batches.push(ids.to_vec());
        true
    }
}
