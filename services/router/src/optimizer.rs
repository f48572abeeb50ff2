//! # Trade Optimizer - Split Quoting and Risk Metrics
//!
//! ## Purpose
//!
//! The user-facing optimize operation: runs the splitter and simulator over
//! the current pool snapshots and annotates the result with the predicted
//! improvement over naive single-pool execution and a set of risk metrics.
//! Pure over its inputs; recomputation scheduling lives in the engine.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Route requests from the engine, pool snapshots from
//!   the store
//! - **Output Destinations**: Engine result channel, batch builder
//! - **Math Libraries**: `routa-amm` for baseline quotes, impact and
//!   slippage figures

use routa_amm::CpmmMath;
use routa_types::{CapOverflow, PoolSnapshot, RouteLeg, SimulationResult, TradePair};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::config::RouterConfig;
use crate::error::RouteError;
use crate::jitter::FillStrategy;
use crate::simulator::ExecutionSimulator;
use crate::splitter::{RouteSplitter, SplitOutcome};

/// One routing request. A new request supersedes any in-flight computation
/// for the same session (see the engine).
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub pair: TradePair,
    pub amount_in: Decimal,
    /// Overrides the configured per-leg slippage tolerance when present
    pub max_slippage_bps: Option<u32>,
}

/// Risk annotations for a quote.
///
/// `first_hop_slippage_pct` repeats the simulator's headline figure;
/// `aggregate_slippage_pct` is the volume-weighted slippage across all legs
/// and exists alongside it because the headline figure understates multi-leg
/// splits. The two are reported side by side rather than reconciled.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskMetrics {
    pub venue_count: usize,
    pub largest_leg_share_pct: Decimal,
    pub first_hop_slippage_pct: Decimal,
    pub aggregate_slippage_pct: Decimal,
    pub max_price_impact_pct: Decimal,
    /// Present when the split bypassed a pool's impact cap; surface as a
    /// warning, not a failure
    pub cap_overflow: Option<CapOverflow>,
}

/// Result of an optimize call
#[derive(Debug, Clone)]
pub struct RouteQuote {
    pub legs: Vec<RouteLeg>,
    /// Split output vs. the best single-pool execution, as a percentage
    pub predicted_improvement_pct: Decimal,
    pub risk: RiskMetrics,
    pub simulation: SimulationResult,
}

/// Computes quotes by wiring the splitter and simulator together
#[derive(Debug, Clone)]
pub struct TradeOptimizer {
    config: RouterConfig,
}

impl TradeOptimizer {
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    /// Produce a quote for `request` over `pools`.
    pub fn optimize(
        &self,
        request: &RouteRequest,
        pools: &[PoolSnapshot],
        fill: &mut dyn FillStrategy,
    ) -> Result<RouteQuote, RouteError> {
        let mut splitter_config = self.config.splitter.clone();
        if let Some(bps) = request.max_slippage_bps {
            splitter_config.slippage_tolerance_bps = bps;
        }

        let splitter = RouteSplitter::new(splitter_config);
        let outcome = splitter.split(&request.pair, request.amount_in, pools, fill)?;

        let simulator = ExecutionSimulator::new(self.config.simulator.clone());
        let simulation = simulator.simulate(&outcome.legs);

        let predicted_improvement_pct =
            self.predicted_improvement(request.amount_in, simulation.total_out, pools)?;
        let risk = self.risk_metrics(&outcome, &simulation, pools)?;

        debug!(
            legs = outcome.legs.len(),
            total_out = %simulation.total_out,
            improvement = %predicted_improvement_pct,
            "optimized route"
        );

        Ok(RouteQuote {
            legs: outcome.legs,
            predicted_improvement_pct,
            risk,
            simulation,
        })
    }

    /// Split output vs. sending the whole amount through the single best
    /// pool, ignoring caps. Negative when splitting loses to the baseline.
    fn predicted_improvement(
        &self,
        amount_in: Decimal,
        total_out: Decimal,
        pools: &[PoolSnapshot],
    ) -> Result<Decimal, RouteError> {
        if amount_in <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let mut baseline = Decimal::ZERO;
        for pool in pools {
            if pool.reserve_in <= Decimal::ZERO {
                continue;
            }
            let out =
                CpmmMath::estimate_out(amount_in, pool.reserve_in, pool.reserve_out, pool.fee_bps)?;
            baseline = baseline.max(out);
        }

        if baseline.is_zero() {
            return Ok(Decimal::ZERO);
        }
        Ok((total_out - baseline) / baseline * dec!(100))
    }

    fn risk_metrics(
        &self,
        outcome: &SplitOutcome,
        simulation: &SimulationResult,
        pools: &[PoolSnapshot],
    ) -> Result<RiskMetrics, RouteError> {
        let legs = &outcome.legs;

        let largest_leg_share_pct = if simulation.total_in > Decimal::ZERO {
            let largest = legs
                .iter()
                .map(|leg| leg.amount_in)
                .max()
                .unwrap_or(Decimal::ZERO);
            largest / simulation.total_in * dec!(100)
        } else {
            Decimal::ZERO
        };

        let mut weighted_slippage = Decimal::ZERO;
        let mut max_price_impact_pct = Decimal::ZERO;
        for leg in legs {
            let Some(pool) = pools.iter().find(|pool| pool.venue == leg.venue) else {
                continue;
            };
            let slippage =
                CpmmMath::slippage(leg.amount_in, pool.reserve_in, pool.reserve_out, pool.fee_bps)?;
            weighted_slippage += slippage * leg.amount_in;

            let impact = CpmmMath::price_impact(leg.amount_in, pool.reserve_in, pool.reserve_out)?;
            max_price_impact_pct = max_price_impact_pct.max(impact);
        }
        let aggregate_slippage_pct = if simulation.total_in > Decimal::ZERO {
            weighted_slippage / simulation.total_in
        } else {
            Decimal::ZERO
        };

        Ok(RiskMetrics {
            venue_count: legs.len(),
            largest_leg_share_pct,
            first_hop_slippage_pct: simulation.slippage_pct,
            aggregate_slippage_pct,
            max_price_impact_pct,
            cap_overflow: outcome.overflow.clone(),
        })
    }
}
