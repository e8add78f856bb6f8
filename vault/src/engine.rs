//! Core vault engine — share conversion and lagged-deposit accounting.

use stew_collab::{GobblerRegistry, GooLedger, MintService};
use stew_types::{Address, GobblerId, Timestamp, VaultParams, PRECISION};

use crate::error::VaultError;
use crate::ledger::LagLedger;
use crate::shares::ShareBook;
use crate::snapshot::VaultSnapshot;
use crate::state::VaultState;

/// The vault engine — prices deposits, issues and burns shares, records
/// lagged deposits, and advances the mint epoch.
///
/// The execution model serializes all operations: each runs to completion
/// before the next begins, and every operation either completes or fails
/// with no partial state mutation. Pricing reads (multiplier, conversion
/// rate, goo debt) always happen against pre-transfer state; external
/// transfers execute next; local state mutates last.
pub struct VaultEngine {
    /// The vault's own address in the custody registry and goo ledger.
    address: Address,
    params: VaultParams,
    state: VaultState,
    shares: ShareBook,
    ledger: LagLedger,
}

impl VaultEngine {
    pub fn new(address: Address, params: VaultParams) -> Self {
        Self {
            address,
            params,
            state: VaultState::new(),
            shares: ShareBook::new(),
            ledger: LagLedger::new(),
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn params(&self) -> &VaultParams {
        &self.params
    }

    pub fn state(&self) -> &VaultState {
        &self.state
    }

    /// Current share balance of `holder`.
    pub fn share_balance_of(&self, holder: &Address) -> u128 {
        self.shares.balance_of(holder)
    }

    /// Recorded lag-ledger weight for (`holder`, `epoch`), PRECISION-scaled.
    pub fn lag_entry(&self, holder: &Address, epoch: u64) -> u128 {
        self.ledger.entry(holder, epoch)
    }

    /// Sum of every outstanding lag-ledger entry.
    pub fn outstanding_lagged_total(&self) -> u128 {
        self.ledger.outstanding_total()
    }

    /// Shares issued per unit of multiplier-weight.
    ///
    /// While no shares exist the rate is the fixed bootstrap value.
    /// Afterwards it is `total_shares / (aggregate - lagged/PRECISION)`,
    /// truncating — round-down favors existing holders and must be
    /// preserved exactly.
    pub fn conversion_rate(&self, registry: &dyn GobblerRegistry) -> Result<u128, VaultError> {
        if self.state.total_shares == 0 {
            return Ok(self.params.bootstrap_rate);
        }
        let aggregate = registry.aggregate_multiplier(&self.address);
        let denominator = aggregate
            .checked_sub(self.state.total_lagged_mult / PRECISION)
            .ok_or(VaultError::Overflow)?;
        self.state
            .total_shares
            .checked_div(denominator)
            .ok_or(VaultError::Overflow)
    }

    /// The extra goo a depositor owes so existing holders are not diluted:
    /// the accrual difference between the vault's multiplier with and
    /// without the incoming weight, over whole days since the last mint.
    ///
    /// Returns 0 before the first mint event. That exemption is a known
    /// front-runnable window in the bootstrap phase, kept as-is.
    pub fn goo_deposit_due(
        &self,
        multiplier: u128,
        now: Timestamp,
        goo: &dyn GooLedger,
    ) -> Result<u128, VaultError> {
        if !self.state.has_minted() {
            return Ok(0);
        }
        let days = self.state.last_mint_time.elapsed_days(now);
        let combined = self
            .state
            .last_mint_multiplier
            .checked_add(multiplier)
            .ok_or(VaultError::Overflow)?;
        let with_deposit = goo.accrued_balance(combined, self.state.last_mint_balance, days);
        let without = goo.accrued_balance(
            self.state.last_mint_multiplier,
            self.state.last_mint_balance,
            days,
        );
        with_deposit.checked_sub(without).ok_or(VaultError::Overflow)
    }

    /// Deposit a gobbler for immediately minted shares.
    ///
    /// Collects the goo debt, takes custody, and issues
    /// `multiplier × rate` shares — tax-split once the tax regime is
    /// active. Returns the total shares issued (both legs).
    pub fn deposit(
        &mut self,
        depositor: &Address,
        id: GobblerId,
        now: Timestamp,
        registry: &mut dyn GobblerRegistry,
        goo: &mut dyn GooLedger,
    ) -> Result<u128, VaultError> {
        // Price against pre-transfer state.
        let multiplier = registry.gobbler_multiplier(id);
        let rate = self.conversion_rate(registry)?;
        let goo_due = self.goo_deposit_due(multiplier, now, goo)?;
        let due_shares = multiplier.checked_mul(rate).ok_or(VaultError::Overflow)?;
        let (holder_shares, tax_shares) = self.split_tax(due_shares)?;

        // Rule out post-transfer arithmetic failure before anything moves.
        self.state
            .total_shares
            .checked_add(due_shares)
            .ok_or(VaultError::Overflow)?;
        self.shares
            .balance_of(depositor)
            .checked_add(due_shares)
            .ok_or(VaultError::Overflow)?;
        self.shares
            .balance_of(&self.params.tax_recipient)
            .checked_add(tax_shares)
            .ok_or(VaultError::Overflow)?;

        if !registry.transfer_gobbler(depositor, &self.address, id) {
            return Err(VaultError::CustodyTransferFailed {
                id,
                from: depositor.clone(),
                to: self.address.clone(),
            });
        }
        if goo_due > 0 && !goo.transfer_from(depositor, &self.address, goo_due) {
            // Compensate the custody move so the operation leaves no trace.
            if !registry.transfer_gobbler(&self.address, depositor, id) {
                tracing::warn!(%id, %depositor, "custody compensation failed after goo rejection");
            }
            return Err(VaultError::BalanceDepositFailed { needed: goo_due });
        }

        // Tax and main issuance stay separate so both legs are auditable.
        if tax_shares > 0 {
            let recipient = self.params.tax_recipient.clone();
            self.shares.mint(&recipient, tax_shares)?;
        }
        self.shares.mint(depositor, holder_shares)?;
        self.state.total_shares += due_shares;

        tracing::debug!(%id, %depositor, multiplier, due_shares, goo_due, "gobbler deposited");
        Ok(due_shares)
    }

    /// Withdraw a gobbler by burning `multiplier × rate` shares.
    ///
    /// Contributed goo is not returned — it stays pooled for the remaining
    /// holders.
    pub fn withdraw(
        &mut self,
        holder: &Address,
        id: GobblerId,
        registry: &mut dyn GobblerRegistry,
    ) -> Result<u128, VaultError> {
        let multiplier = registry.gobbler_multiplier(id);
        let rate = self.conversion_rate(registry)?;
        let burn_shares = multiplier.checked_mul(rate).ok_or(VaultError::Overflow)?;

        let available = self.shares.balance_of(holder);
        if available < burn_shares {
            return Err(VaultError::InsufficientShares {
                needed: burn_shares,
                available,
            });
        }
        self.state
            .total_shares
            .checked_sub(burn_shares)
            .ok_or(VaultError::Overflow)?;

        if !registry.transfer_gobbler(&self.address, holder, id) {
            return Err(VaultError::CustodyTransferFailed {
                id,
                from: self.address.clone(),
                to: holder.clone(),
            });
        }

        self.shares.burn(holder, burn_shares)?;
        self.state.total_shares -= burn_shares;

        tracing::debug!(%id, %holder, multiplier, burn_shares, "gobbler withdrawn");
        Ok(burn_shares)
    }

    /// Deposit a gobbler without settling goo now.
    ///
    /// Custody moves immediately; the multiplier-weight is recorded under
    /// the current epoch (tax-split as ledger credits) and priced by the
    /// next mint event. Returns the total PRECISION-scaled weight recorded.
    pub fn deposit_lagged(
        &mut self,
        depositor: &Address,
        id: GobblerId,
        registry: &mut dyn GobblerRegistry,
    ) -> Result<u128, VaultError> {
        if !self.state.has_minted() {
            return Err(VaultError::NoMintEventYet);
        }
        let multiplier = registry.gobbler_multiplier(id);
        let scaled = multiplier.checked_mul(PRECISION).ok_or(VaultError::Overflow)?;
        let (holder_weight, tax_weight) = self.split_tax(scaled)?;
        let epoch = self.state.mint_epoch;
        self.state
            .total_lagged_mult
            .checked_add(scaled)
            .ok_or(VaultError::Overflow)?;
        self.ledger
            .entry(depositor, epoch)
            .checked_add(holder_weight)
            .ok_or(VaultError::Overflow)?;
        self.ledger
            .entry(&self.params.tax_recipient, epoch)
            .checked_add(tax_weight)
            .ok_or(VaultError::Overflow)?;

        if !registry.transfer_gobbler(depositor, &self.address, id) {
            return Err(VaultError::CustodyTransferFailed {
                id,
                from: depositor.clone(),
                to: self.address.clone(),
            });
        }

        if tax_weight > 0 {
            let recipient = self.params.tax_recipient.clone();
            self.ledger.credit(&recipient, epoch, tax_weight)?;
        }
        self.ledger.credit(depositor, epoch, holder_weight)?;
        self.state.total_lagged_mult += scaled;

        tracing::debug!(%id, %depositor, multiplier, epoch, "gobbler deposited lagged");
        Ok(scaled)
    }

    /// Take back a gobbler lag-deposited in the *current* epoch.
    ///
    /// Past-epoch entries are locked in: the price info they settle against
    /// goes stale once a mint event passes them.
    pub fn withdraw_lagged(
        &mut self,
        depositor: &Address,
        id: GobblerId,
        registry: &mut dyn GobblerRegistry,
    ) -> Result<(), VaultError> {
        let multiplier = registry.gobbler_multiplier(id);
        let scaled = multiplier.checked_mul(PRECISION).ok_or(VaultError::Overflow)?;
        let epoch = self.state.mint_epoch;

        let recorded = self.ledger.entry(depositor, epoch);
        if recorded < scaled {
            return Err(VaultError::InsufficientLedgerBalance {
                needed: scaled,
                recorded,
            });
        }
        self.state
            .total_lagged_mult
            .checked_sub(scaled)
            .ok_or(VaultError::Overflow)?;

        if !registry.transfer_gobbler(&self.address, depositor, id) {
            return Err(VaultError::CustodyTransferFailed {
                id,
                from: self.address.clone(),
                to: depositor.clone(),
            });
        }

        self.ledger.debit(depositor, epoch, scaled)?;
        self.state.total_lagged_mult -= scaled;

        tracing::debug!(%id, %depositor, multiplier, epoch, "lagged deposit withdrawn");
        Ok(())
    }

    /// Convert settled lag-ledger entries to shares.
    ///
    /// Every listed epoch must have been passed by a subsequent mint; one
    /// unsettled epoch aborts the whole batch with nothing mutated. The
    /// conversion rate is read once and reused for every epoch. Returns the
    /// total shares minted.
    pub fn claim_lagged(
        &mut self,
        claimer: &Address,
        epochs: &[u64],
        registry: &dyn GobblerRegistry,
    ) -> Result<u128, VaultError> {
        let rate = self.conversion_rate(registry)?;

        // Validate and total the batch before touching anything.
        let mut seen = std::collections::HashSet::new();
        let mut weight_total: u128 = 0;
        let mut shares_total: u128 = 0;
        for &epoch in epochs {
            if self.state.mint_epoch <= epoch {
                return Err(VaultError::EpochNotYetSettled {
                    epoch,
                    current: self.state.mint_epoch,
                });
            }
            if !seen.insert(epoch) {
                continue;
            }
            let weight = self.ledger.entry(claimer, epoch);
            let minted = (weight / PRECISION)
                .checked_mul(rate)
                .ok_or(VaultError::Overflow)?;
            weight_total = weight_total.checked_add(weight).ok_or(VaultError::Overflow)?;
            shares_total = shares_total.checked_add(minted).ok_or(VaultError::Overflow)?;
        }
        self.state
            .total_lagged_mult
            .checked_sub(weight_total)
            .ok_or(VaultError::Overflow)?;
        self.state
            .total_shares
            .checked_add(shares_total)
            .ok_or(VaultError::Overflow)?;
        self.shares
            .balance_of(claimer)
            .checked_add(shares_total)
            .ok_or(VaultError::Overflow)?;

        for &epoch in &seen {
            self.ledger.take(claimer, epoch);
        }
        self.state.total_lagged_mult -= weight_total;
        self.shares.mint(claimer, shares_total)?;
        self.state.total_shares += shares_total;

        tracing::debug!(%claimer, ?epochs, shares_total, "lagged deposits claimed");
        Ok(shares_total)
    }

    /// Reinvest the pooled goo balance into minting a new gobbler, then
    /// snapshot post-mint state and advance the epoch.
    ///
    /// Callable by anyone — there is deliberately no admission control.
    /// Returns the new epoch.
    pub fn mint_gobbler(
        &mut self,
        now: Timestamp,
        registry: &dyn GobblerRegistry,
        goo: &dyn GooLedger,
        minter: &mut dyn MintService,
    ) -> Result<u64, VaultError> {
        let balance = goo.balance(&self.address);
        if !minter.mint_from_balance(balance, true) {
            return Err(VaultError::MintFailed);
        }

        self.state.last_mint_multiplier = registry.aggregate_multiplier(&self.address);
        self.state.last_mint_balance = goo.balance(&self.address);
        self.state.last_mint_time = now;
        self.state.mint_epoch = self
            .state
            .mint_epoch
            .checked_add(1)
            .ok_or(VaultError::Overflow)?;

        tracing::info!(
            epoch = self.state.mint_epoch,
            multiplier = self.state.last_mint_multiplier,
            balance = self.state.last_mint_balance,
            "mint epoch advanced"
        );
        Ok(self.state.mint_epoch)
    }

    /// Forward a legendary-tier batch mint verbatim.
    ///
    /// No reentrancy guard around the external call; the execution model
    /// serializes operations.
    pub fn mint_legendary_gobbler(
        &self,
        ids: &[GobblerId],
        minter: &mut dyn MintService,
    ) -> Result<(), VaultError> {
        if !minter.mint_batch(ids) {
            return Err(VaultError::MintFailed);
        }
        tracing::debug!(count = ids.len(), "legendary batch mint forwarded");
        Ok(())
    }

    /// Capture a deterministic point-in-time snapshot of the vault.
    pub fn snapshot(&self, now: Timestamp) -> VaultSnapshot {
        VaultSnapshot::create(self.state.clone(), &self.shares, &self.ledger, now)
    }

    /// Restore an engine from a verified snapshot.
    pub fn from_snapshot(
        address: Address,
        params: VaultParams,
        snapshot: &VaultSnapshot,
    ) -> Result<Self, VaultError> {
        if !snapshot.verify() {
            return Err(VaultError::SnapshotCorrupt);
        }
        let mut engine = Self::new(address, params);
        engine.state = snapshot.state.clone();
        for (holder, balance) in &snapshot.share_balances {
            engine.shares.mint(holder, *balance)?;
        }
        for (holder, epoch, weight) in &snapshot.lag_entries {
            engine.ledger.credit(holder, *epoch, *weight)?;
        }
        Ok(engine)
    }

    /// Split a due amount into (holder leg, tax leg). The tax leg is zero
    /// until the tax regime activates; the two legs always sum to the
    /// pre-tax amount.
    fn split_tax(&self, due: u128) -> Result<(u128, u128), VaultError> {
        if !self.params.tax_active(self.state.mint_epoch) {
            return Ok((due, 0));
        }
        let tax = due
            .checked_mul(self.params.tax_rate)
            .ok_or(VaultError::Overflow)?
            / PRECISION;
        Ok((due - tax, tax))
    }
}
