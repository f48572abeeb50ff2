//! Full split → simulate → build scenarios over canonical fixtures

use routa_e2e_tests::fixtures;
use routa_router::batch::BatchBuilder;
use routa_router::config::{RouterConfig, SplitterConfig};
use routa_router::engine::{RouterEngine, SettlementClient};
use routa_router::error::RouteError;
use routa_router::jitter::{FullFill, SeededJitter};
use routa_router::optimizer::{RouteRequest, TradeOptimizer};
use routa_router::pool_store::PoolStore;
use routa_router::simulator::ExecutionSimulator;
use routa_router::splitter::RouteSplitter;
use routa_types::{BatchPayload, Decimal};
use rust_decimal_macros::dec;
use std::sync::Arc;

fn splitter() -> RouteSplitter {
    RouteSplitter::new(SplitterConfig {
        max_impact_pct: dec!(10),
        slippage_tolerance_bps: 50,
    })
}

fn simulator() -> ExecutionSimulator {
    ExecutionSimulator::new(RouterConfig::default().simulator)
}

fn builder() -> BatchBuilder {
    BatchBuilder::new(RouterConfig::default().batch)
}

#[test]
fn single_pool_flow_matches_curve_arithmetic() {
    let pools = vec![fixtures::reference_pool()];
    let outcome = splitter()
        .split(&fixtures::demo_pair(), dec!(50000), &pools, &mut FullFill)
        .unwrap();

    assert_eq!(outcome.legs.len(), 1);
    let leg = &outcome.legs[0];
    assert_eq!(leg.amount_in, dec!(50000));
    // 49,875 effective input against 1M:500k
    assert!((leg.estimated_out - dec!(23752.83)).abs() < dec!(0.01));

    let result = simulator().simulate(&outcome.legs);
    assert_eq!(result.total_in, dec!(50000));
    assert_eq!(result.total_out, leg.estimated_out);

    let payload = builder()
        .build(&outcome.legs, &fixtures::full_router_map(), fixtures::RECIPIENT)
        .unwrap();
    let expected_floor = (leg.estimated_out * dec!(0.995)).floor().normalize();
    assert_eq!(payload.condition, format!("outputs_sum >= {expected_floor}"));
}

#[test]
fn capacity_split_produces_two_legs_without_overflow() {
    let outcome = splitter()
        .split(
            &fixtures::demo_pair(),
            dec!(80000),
            &fixtures::capped_pools(),
            &mut FullFill,
        )
        .unwrap();

    // Caps are {50k, 30k, 20k}: 80k fills the two largest and stops
    assert_eq!(outcome.legs.len(), 2);
    assert_eq!(outcome.legs[0].venue, "uniswap");
    assert_eq!(outcome.legs[0].amount_in, dec!(50000));
    assert_eq!(outcome.legs[1].venue, "sushiswap");
    assert_eq!(outcome.legs[1].amount_in, dec!(30000));
    assert!(outcome.overflow.is_none());
}

#[test]
fn overflow_split_conserves_total_and_flags_the_cap_bypass() {
    // 10k more than the 100k capacity sum
    let outcome = splitter()
        .split(
            &fixtures::demo_pair(),
            dec!(110000),
            &fixtures::capped_pools(),
            &mut FullFill,
        )
        .unwrap();

    let total_in: Decimal = outcome.legs.iter().map(|leg| leg.amount_in).sum();
    assert_eq!(total_in, dec!(110000));

    let overflow = outcome.overflow.expect("cap bypass must be flagged");
    assert_eq!(overflow.venue, "uniswap");
    assert_eq!(overflow.amount_over_cap, dec!(10000));

    // Every leg except the overflow leg respects its cap
    for leg in &outcome.legs {
        let pool = fixtures::capped_pools()
            .into_iter()
            .find(|pool| pool.venue == leg.venue)
            .unwrap();
        let cap = pool.impact_cap(dec!(10));
        if leg.venue == overflow.venue {
            assert!(leg.amount_in > cap);
        } else {
            assert!(leg.amount_in <= cap);
        }
    }
}

#[test]
fn dropped_leg_stays_in_the_aggregate_condition() {
    let outcome = splitter()
        .split(
            &fixtures::demo_pair(),
            dec!(100000),
            &fixtures::capped_pools(),
            &mut FullFill,
        )
        .unwrap();
    assert_eq!(outcome.legs.len(), 3);

    let mut partial_map = fixtures::full_router_map();
    partial_map.remove("quickswap");

    let payload = builder()
        .build(&outcome.legs, &partial_map, fixtures::RECIPIENT)
        .unwrap();

    // Two calls execute, but the condition still targets all three
    // predicted outputs
    assert_eq!(payload.targets.len(), 2);
    assert_eq!(payload.call_data.len(), 2);

    let aggregate: Decimal = outcome.legs.iter().map(|leg| leg.estimated_out).sum();
    let expected_floor = (aggregate * dec!(0.995)).floor().normalize();
    assert_eq!(payload.condition, format!("outputs_sum >= {expected_floor}"));
}

#[test]
fn zero_amount_is_a_trivial_no_op() {
    let outcome = splitter()
        .split(
            &fixtures::demo_pair(),
            dec!(0),
            &fixtures::capped_pools(),
            &mut FullFill,
        )
        .unwrap();
    assert!(outcome.legs.is_empty());

    let result = simulator().simulate(&outcome.legs);
    assert_eq!(result.total_in, Decimal::ZERO);
    assert_eq!(result.gas_estimate, 0);
}

#[test]
fn seeded_pipeline_is_idempotent() {
    let run = |seed: u64| {
        let outcome = splitter()
            .split(
                &fixtures::demo_pair(),
                dec!(90000),
                &fixtures::capped_pools(),
                &mut SeededJitter::new(seed),
            )
            .unwrap();
        simulator().simulate(&outcome.legs)
    };

    let first = run(1234);
    let second = run(1234);
    assert_eq!(first, second);

    let total_in: Decimal = first.legs.iter().map(|leg| leg.amount_in).sum();
    assert_eq!(total_in, dec!(90000));
}

#[test]
fn optimizer_quote_feeds_the_batch_builder() {
    let optimizer = TradeOptimizer::new(RouterConfig::default());
    let quote = optimizer
        .optimize(
            &RouteRequest {
                pair: fixtures::demo_pair(),
                amount_in: dec!(80000),
                max_slippage_bps: None,
            },
            &fixtures::capped_pools(),
            &mut FullFill,
        )
        .unwrap();

    assert!(quote.predicted_improvement_pct > Decimal::ZERO);

    let payload = builder()
        .build(&quote.legs, &fixtures::full_router_map(), fixtures::RECIPIENT)
        .unwrap();
    assert_eq!(payload.len(), quote.legs.len());
    assert!(payload.deadline > 0);
}

#[test]
fn leg_estimates_match_direct_curve_queries() {
    let pools = fixtures::capped_pools();
    let outcome = splitter()
        .split(&fixtures::demo_pair(), dec!(60000), &pools, &mut FullFill)
        .unwrap();
    assert!(!outcome.legs.is_empty());

    for leg in &outcome.legs {
        let pool = pools.iter().find(|pool| pool.venue == leg.venue).unwrap();
        let direct = routa_amm::CpmmMath::estimate_out(
            leg.amount_in,
            pool.reserve_in,
            pool.reserve_out,
            pool.fee_bps,
        )
        .unwrap();
        assert_eq!(leg.estimated_out, direct);
    }
}

#[test]
fn empty_pool_set_is_no_liquidity_end_to_end() {
    let err = splitter()
        .split(&fixtures::demo_pair(), dec!(1000), &[], &mut FullFill)
        .unwrap_err();
    assert!(matches!(err, RouteError::NoLiquidity { .. }));
}

#[tokio::test]
async fn engine_round_trip_supersedes_stale_requests() {
    let store = Arc::new(PoolStore::new());
    for pool in fixtures::capped_pools() {
        store.upsert(pool).unwrap();
    }

    let (engine, mut handle) =
        RouterEngine::new(store, RouterConfig::default(), Box::new(FullFill));
    let task = tokio::spawn(engine.run());

    handle.submit_request(RouteRequest {
        pair: fixtures::demo_pair(),
        amount_in: dec!(5000),
        max_slippage_bps: None,
    });
    handle.submit_request(RouteRequest {
        pair: fixtures::demo_pair(),
        amount_in: dec!(80000),
        max_slippage_bps: None,
    });

    // The newest request always gets an answer; the stale one may be skipped
    loop {
        let update = handle.next_update().await.expect("engine must publish");
        if update.request.amount_in == dec!(80000) {
            let quote = update.result.expect("quote must succeed");
            assert_eq!(quote.simulation.total_in, dec!(80000));
            break;
        }
    }

    drop(handle);
    task.await.unwrap();
}

#[tokio::test]
async fn settlement_failure_is_opaque_to_the_core() {
    struct RejectingSettlement;

    #[async_trait::async_trait]
    impl SettlementClient for RejectingSettlement {
        async fn submit(&self, _payload: &BatchPayload) -> Result<(), RouteError> {
            Err(RouteError::Settlement {
                reason: "bundle rejected".to_string(),
            })
        }
    }

    let outcome = splitter()
        .split(
            &fixtures::demo_pair(),
            dec!(10000),
            &fixtures::capped_pools(),
            &mut FullFill,
        )
        .unwrap();
    let payload = builder()
        .build(&outcome.legs, &fixtures::full_router_map(), fixtures::RECIPIENT)
        .unwrap();

    let err = RejectingSettlement.submit(&payload).await.unwrap_err();
    assert!(matches!(err, RouteError::Settlement { .. }));
}
