//! Vault parameters — fixed-point constants plus the deployment-tunable values.

use crate::address::Address;
use serde::{Deserialize, Serialize};

/// Fixed-point scaling factor for multiplier-weight stored in the lag ledger.
pub const PRECISION: u128 = 1_000_000;

/// One whole share in raw units (18 decimals). Also the bootstrap
/// conversion rate: before any shares exist, one unit of multiplier-weight
/// converts to exactly one whole share.
pub const SHARE_UNIT: u128 = 1_000_000_000_000_000_000;

/// Seconds per day — goo accrual is priced in whole elapsed days.
pub const DAY_SECS: u64 = 86_400;

/// All vault parameters fixed at deployment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VaultParams {
    /// Conversion rate used while `total_shares == 0` (shares per unit of
    /// multiplier-weight, raw).
    pub bootstrap_rate: u128,

    /// Flat tax on issued shares once the tax regime activates, as a
    /// fraction of [`PRECISION`]. Default: 500_000 (50%).
    pub tax_rate: u128,

    /// Number of mint events after which the tax regime activates
    /// (strictly greater than). Default: 2.
    pub tax_mint_threshold: u64,

    /// Recipient of the taxed share of every issuance.
    pub tax_recipient: Address,
}

impl VaultParams {
    /// STEW defaults — the intended configuration for a live vault.
    pub fn stew_defaults(tax_recipient: Address) -> Self {
        Self {
            bootstrap_rate: SHARE_UNIT,
            tax_rate: PRECISION / 2, // 50%
            tax_mint_threshold: 2,
            tax_recipient,
        }
    }

    /// Whether the tax regime is active after `mint_count` mint events.
    /// One-way boundary: once crossed there is no transition back.
    pub fn tax_active(&self, mint_count: u64) -> bool {
        mint_count > self.tax_mint_threshold
    }
}
