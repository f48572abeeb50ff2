//! Execution simulator: pure aggregation over a leg set
//!
//! Collapses a split into the single predicted result shown to the user:
//! total input/output, a headline slippage figure, and an illustrative gas
//! estimate. No side effects and no pool access; everything derives from the
//! legs themselves.
//!
//! The slippage figure is computed from the FIRST leg only,
//! `abs((legs[0].estimated_out / max(legs[0].amount_in, 1) - 1) * 100)`,
//! reproducing the reference behavior. It understates slippage for
//! multi-leg splits and is intentionally independent of the batch builder's
//! aggregate output floor; do not unify the two without a design decision.

use routa_types::{RouteLeg, SimulationResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::SimulatorConfig;

/// Aggregates legs into a predicted execution result
#[derive(Debug, Clone)]
pub struct ExecutionSimulator {
    config: SimulatorConfig,
}

impl ExecutionSimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// Aggregate `legs` into a [`SimulationResult`]. An empty leg set yields
    /// the all-zero result.
    pub fn simulate(&self, legs: &[RouteLeg]) -> SimulationResult {
        let Some(first) = legs.first() else {
            return SimulationResult::empty();
        };

        let total_in: Decimal = legs.iter().map(|leg| leg.amount_in).sum();
        let total_out: Decimal = legs.iter().map(|leg| leg.estimated_out).sum();

        // First-leg figure, kept verbatim from the reference design
        let denominator = first.amount_in.max(Decimal::ONE);
        let slippage_pct = ((first.estimated_out / denominator - Decimal::ONE) * dec!(100)).abs();

        let gas_estimate =
            self.config.gas_base + legs.len() as u64 * self.config.gas_per_leg;

        SimulationResult {
            total_in,
            total_out,
            slippage_pct,
            gas_estimate,
            legs: legs.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn leg(venue: &str, amount_in: Decimal, estimated_out: Decimal) -> RouteLeg {
        RouteLeg {
            venue: venue.to_string(),
            amount_in,
            estimated_out,
            path: vec!["0xaaa".to_string(), "0xbbb".to_string()],
            min_out: None,
        }
    }

    fn simulator() -> ExecutionSimulator {
        ExecutionSimulator::new(SimulatorConfig {
            gas_base: 100_000,
            gas_per_leg: 120_000,
        })
    }

    #[test]
    fn test_totals_are_plain_sums() {
        let legs = vec![
            leg("a", dec!(50000), dec!(23700)),
            leg("b", dec!(30000), dec!(14400)),
        ];
        let result = simulator().simulate(&legs);

        assert_eq!(result.total_in, dec!(80000));
        assert_eq!(result.total_out, dec!(38100));
        assert_eq!(result.legs.len(), 2);
    }

    #[test]
    fn test_slippage_comes_from_first_leg_only() {
        // First leg: 100 in, 90 out -> |(0.9 - 1) * 100| = 10%
        // Second leg would imply 50%, and must not affect the figure
        let legs = vec![
            leg("a", dec!(100), dec!(90)),
            leg("b", dec!(100), dec!(50)),
        ];
        let result = simulator().simulate(&legs);
        assert_eq!(result.slippage_pct, dec!(10));
    }

    #[test]
    fn test_slippage_denominator_floors_at_one() {
        // Sub-unit first leg: denominator clamps to 1
        let legs = vec![leg("a", dec!(0.5), dec!(0.25))];
        let result = simulator().simulate(&legs);
        // |(0.25 / 1 - 1) * 100| = 75
        assert_eq!(result.slippage_pct, dec!(75));
    }

    #[test]
    fn test_gas_is_linear_in_leg_count() {
        let legs = vec![
            leg("a", dec!(10), dec!(9)),
            leg("b", dec!(10), dec!(9)),
            leg("c", dec!(10), dec!(9)),
        ];
        let result = simulator().simulate(&legs);
        assert_eq!(result.gas_estimate, 100_000 + 3 * 120_000);
    }

    #[test]
    fn test_empty_legs_yield_zero_result() {
        let result = simulator().simulate(&[]);
        assert_eq!(result, SimulationResult::empty());
    }

    #[test]
    fn test_simulation_is_idempotent() {
        let legs = vec![leg("a", dec!(100), dec!(97))];
        assert_eq!(simulator().simulate(&legs), simulator().simulate(&legs));
    }
}
