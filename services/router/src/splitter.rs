//! # Route Splitter - Greedy Capacity-Capped Allocation
//!
//! ## Purpose
//!
//! Allocates a requested trade amount across the available liquidity venues
//! subject to a per-pool price-impact cap, producing the ordered leg list
//! consumed by the simulator and batch builder. Larger pools absorb volume
//! first; the ordering is a deterministic greedy heuristic, not a global
//! optimum, and must stay bit-for-bit reproducible for identical inputs.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Pool snapshots (read-only) from the pool store
//! - **Output Destinations**: Execution simulator, trade optimizer, batch
//!   builder
//! - **Math Libraries**: `routa-amm` for constant-product output estimates
//! - **Fill Strategies**: Caller-supplied [`FillStrategy`] for the optional
//!   allocation jitter
//!
//! ## Allocation Algorithm
//!
//! ```text
//! caps = floor(reserve_in * max_impact_pct / 100) per pool, drop cap <= 0
//! order by descending cap, ties by original input order (stable)
//! for each pool: take min(remaining, cap) * fill_factor, append leg
//! if remaining > 0 after all pools: assign it to the largest-reserve pool,
//!                                   bypassing its cap (the one exception)
//! ```
//!
//! The overflow fallback is a fill-or-explain policy: the sum of leg inputs
//! always equals the requested amount, and the bypass is reported through
//! [`CapOverflow`] so callers can surface a warning.

use routa_amm::CpmmMath;
use routa_types::{CapOverflow, PoolSnapshot, RouteLeg, TradePair};
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::SplitterConfig;
use crate::error::RouteError;
use crate::jitter::FillStrategy;

/// Result of one allocation pass
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    pub legs: Vec<RouteLeg>,
    /// Present when the overflow fallback bypassed a pool's impact cap
    pub overflow: Option<CapOverflow>,
}

/// Splits a total trade amount across pools under per-pool impact caps
#[derive(Debug, Clone)]
pub struct RouteSplitter {
    config: SplitterConfig,
}

impl RouteSplitter {
    pub fn new(config: SplitterConfig) -> Self {
        Self { config }
    }

    /// Allocate `total_amount` across `pools`.
    ///
    /// A zero amount is a trivial no-op yielding zero legs; a negative
    /// amount is rejected before any pool iteration. When every pool's cap
    /// is zero (or there are no pools) and the amount is positive, the pair
    /// has no usable liquidity.
    pub fn split(
        &self,
        pair: &TradePair,
        total_amount: Decimal,
        pools: &[PoolSnapshot],
        fill: &mut dyn FillStrategy,
    ) -> Result<SplitOutcome, RouteError> {
        if total_amount < Decimal::ZERO {
            return Err(RouteError::InvalidAmount {
                amount: total_amount,
            });
        }
        if total_amount.is_zero() {
            return Ok(SplitOutcome {
                legs: Vec::new(),
                overflow: None,
            });
        }

        // Capacity pass: keep (pool, cap) for capacitated pools only. A pool
        // with reserve_in = 0 has zero capacity, never infinite.
        let mut capacitated: Vec<(&PoolSnapshot, Decimal)> = pools
            .iter()
            .map(|pool| (pool, pool.impact_cap(self.config.max_impact_pct)))
            .filter(|(_, cap)| *cap > Decimal::ZERO)
            .collect();

        if capacitated.is_empty() {
            return Err(RouteError::NoLiquidity {
                pair: format!("{}/{}", pair.token_in, pair.token_out),
            });
        }

        // Descending capacity, ties broken by original input order. The
        // stable sort is load-bearing: it is what makes the greedy order
        // deterministic across runs.
        capacitated.sort_by(|a, b| b.1.cmp(&a.1));

        let mut legs: Vec<RouteLeg> = Vec::new();
        let mut remaining = total_amount;

        for (pool, cap) in &capacitated {
            if remaining <= Decimal::ZERO {
                break;
            }

            let take = remaining.min(*cap) * fill.fill_factor();
            if take <= Decimal::ZERO {
                continue;
            }

            let estimated_out =
                CpmmMath::estimate_out(take, pool.reserve_in, pool.reserve_out, pool.fee_bps)?;

            debug!(
                venue = %pool.venue,
                %take,
                %estimated_out,
                %remaining,
                "allocated leg"
            );

            legs.push(self.leg(pair, pool, take, estimated_out));
            remaining -= take;
        }

        // Overflow fallback: park whatever is left on the deepest pool,
        // cap bypassed, so the split conserves the requested total exactly.
        // Caps are monotone in reserve_in, so the deepest pool is always in
        // the capacitated set.
        let mut overflow = None;
        if remaining > Decimal::ZERO {
            let (deepest, cap) = match capacitated
                .iter()
                .max_by(|a, b| a.0.reserve_in.cmp(&b.0.reserve_in))
            {
                Some((pool, cap)) => (*pool, *cap),
                None => {
                    return Err(RouteError::NoLiquidity {
                        pair: format!("{}/{}", pair.token_in, pair.token_out),
                    })
                }
            };
            let combined = match legs.iter().position(|leg| leg.venue == deepest.venue) {
                Some(idx) => {
                    let prior = legs.remove(idx);
                    prior.amount_in + remaining
                }
                None => remaining,
            };

            let estimated_out = CpmmMath::estimate_out(
                combined,
                deepest.reserve_in,
                deepest.reserve_out,
                deepest.fee_bps,
            )?;

            debug!(
                venue = %deepest.venue,
                amount = %combined,
                %cap,
                "overflow fallback bypassed impact cap"
            );

            legs.push(self.leg(pair, deepest, combined, estimated_out));
            overflow = Some(CapOverflow {
                venue: deepest.venue.clone(),
                amount_over_cap: (combined - cap).max(Decimal::ZERO),
            });
        }

        Ok(SplitOutcome { legs, overflow })
    }

    fn leg(
        &self,
        pair: &TradePair,
        pool: &PoolSnapshot,
        amount_in: Decimal,
        estimated_out: Decimal,
    ) -> RouteLeg {
        let tolerance = Decimal::from(self.config.slippage_tolerance_bps) / Decimal::from(10_000u32);
        let min_out = (estimated_out * (Decimal::ONE - tolerance)).floor();

        RouteLeg {
            venue: pool.venue.clone(),
            amount_in,
            estimated_out,
            path: pair.path(),
            min_out: Some(min_out),
        }
    }
}
