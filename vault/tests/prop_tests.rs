use proptest::prelude::*;

use stew_collab::registry::GobblerRegistry;
use stew_nullables::{NullGobblerRegistry, NullGooLedger, NullMintService};
use stew_types::{Address, GobblerId, Timestamp, VaultParams, DAY_SECS, PRECISION};
use stew_vault::VaultEngine;

#[derive(Clone, Debug)]
enum Op {
    Deposit(u64),
    Withdraw(u64),
    DepositLagged(u64),
    WithdrawLagged(u64),
    Claim(u64),
    Mint,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u64..=4).prop_map(Op::Deposit),
        (1u64..=4).prop_map(Op::Withdraw),
        (1u64..=4).prop_map(Op::DepositLagged),
        (1u64..=4).prop_map(Op::WithdrawLagged),
        (0u64..6).prop_map(Op::Claim),
        Just(Op::Mint),
    ]
}

proptest! {
    /// After every operation (successful or rejected), the global lagged
    /// total equals the sum of outstanding ledger entries, and the total
    /// share supply equals the sum of holder balances.
    #[test]
    fn conservation_under_random_op_sequences(
        multipliers in proptest::collection::vec(1u128..10, 4),
        ops in proptest::collection::vec(op_strategy(), 1..60),
    ) {
        let alice = Address::new("alice");
        let treasury = Address::new("treasury");
        let vault = Address::new("vault");

        let mut engine = VaultEngine::new(
            vault.clone(),
            VaultParams::stew_defaults(treasury.clone()),
        );
        let mut registry = NullGobblerRegistry::new();
        for (i, m) in multipliers.iter().enumerate() {
            registry.add_gobbler(GobblerId::new(i as u64 + 1), alice.clone(), *m);
        }
        let mut goo = NullGooLedger::new();
        goo.set_balance(alice.clone(), 1u128 << 80);
        let mut minter = NullMintService::new();

        for (step, op) in ops.iter().enumerate() {
            let now = Timestamp::new(step as u64 * DAY_SECS);
            // Rejected operations are part of the test: they must leave the
            // invariants intact too.
            let _ = match op {
                Op::Deposit(i) => engine
                    .deposit(&alice, GobblerId::new(*i), now, &mut registry, &mut goo)
                    .map(|_| ()),
                Op::Withdraw(i) => engine
                    .withdraw(&alice, GobblerId::new(*i), &mut registry)
                    .map(|_| ()),
                Op::DepositLagged(i) => engine
                    .deposit_lagged(&alice, GobblerId::new(*i), &mut registry)
                    .map(|_| ()),
                Op::WithdrawLagged(i) => {
                    engine.withdraw_lagged(&alice, GobblerId::new(*i), &mut registry)
                }
                Op::Claim(epoch) => engine
                    .claim_lagged(&alice, &[*epoch], &registry)
                    .map(|_| ()),
                Op::Mint => engine
                    .mint_gobbler(now, &registry, &goo, &mut minter)
                    .map(|_| ()),
            };

            prop_assert_eq!(
                engine.state().total_lagged_mult,
                engine.outstanding_lagged_total(),
                "lagged total out of sync after step {}",
                step
            );
            prop_assert_eq!(
                engine.state().total_shares,
                engine.share_balance_of(&alice) + engine.share_balance_of(&treasury),
                "share supply out of sync after step {}",
                step
            );

            // Floor division: the quoted rate never over-values the supply.
            if engine.state().total_shares > 0 {
                let denom = registry
                    .aggregate_multiplier(&vault)
                    .checked_sub(engine.state().total_lagged_mult / PRECISION);
                if let (Ok(rate), Some(denom)) = (engine.conversion_rate(&registry), denom) {
                    prop_assert!(rate * denom <= engine.state().total_shares);
                }
            }
        }

        // The snapshot of any reachable state verifies.
        prop_assert!(engine.snapshot(Timestamp::new(0)).verify());
    }

    /// Under the tax regime both issuance legs always sum to the pre-tax
    /// amount — truncation never creates or destroys shares.
    #[test]
    fn tax_split_sums_to_pretax(seed_mult in 1u128..100, dep_mult in 1u128..1_000) {
        let alice = Address::new("alice");
        let bob = Address::new("bob");
        let treasury = Address::new("treasury");

        let mut engine = VaultEngine::new(
            Address::new("vault"),
            VaultParams::stew_defaults(treasury.clone()),
        );
        let mut registry = NullGobblerRegistry::new();
        registry.add_gobbler(GobblerId::new(1), alice.clone(), seed_mult);
        registry.add_gobbler(GobblerId::new(2), bob.clone(), dep_mult);
        let mut goo = NullGooLedger::new();
        let mut minter = NullMintService::new();

        let t = Timestamp::new(0);
        engine.deposit(&alice, GobblerId::new(1), t, &mut registry, &mut goo).unwrap();
        for _ in 0..3 {
            engine.mint_gobbler(t, &registry, &goo, &mut minter).unwrap();
        }

        let rate = engine.conversion_rate(&registry).unwrap();
        let minted = engine
            .deposit(&bob, GobblerId::new(2), t, &mut registry, &mut goo)
            .unwrap();

        prop_assert_eq!(minted, dep_mult * rate);
        prop_assert_eq!(
            engine.share_balance_of(&bob) + engine.share_balance_of(&treasury),
            dep_mult * rate
        );
    }

    /// An isolated depositor round-trips to exactly zero outside the tax
    /// regime, whatever the multiplier.
    #[test]
    fn round_trip_is_exact(multiplier in 1u128..1_000_000) {
        let alice = Address::new("alice");
        let mut engine = VaultEngine::new(
            Address::new("vault"),
            VaultParams::stew_defaults(Address::new("treasury")),
        );
        let mut registry = NullGobblerRegistry::new();
        registry.add_gobbler(GobblerId::new(1), alice.clone(), multiplier);
        let mut goo = NullGooLedger::new();

        let minted = engine
            .deposit(&alice, GobblerId::new(1), Timestamp::new(0), &mut registry, &mut goo)
            .unwrap();
        let burned = engine.withdraw(&alice, GobblerId::new(1), &mut registry).unwrap();

        prop_assert_eq!(minted, burned);
        prop_assert_eq!(engine.state().total_shares, 0);
        prop_assert_eq!(engine.share_balance_of(&alice), 0);
    }
}
