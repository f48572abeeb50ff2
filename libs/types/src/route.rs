//! Split-trade legs and simulation aggregates

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The two sides of the trade being routed. Token identifiers are opaque to
/// the core; the batch builder expects hex contract addresses when it encodes
/// calldata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradePair {
    pub token_in: String,
    pub token_out: String,
}

impl TradePair {
    pub fn new(token_in: impl Into<String>, token_out: impl Into<String>) -> Self {
        Self {
            token_in: token_in.into(),
            token_out: token_out.into(),
        }
    }

    /// Leg path for a direct swap on this pair.
    pub fn path(&self) -> Vec<String> {
        vec![self.token_in.clone(), self.token_out.clone()]
    }
}

/// One allocation decision of a split trade.
///
/// Every leg respects `amount_in <= cap(pool)` except the single designated
/// overflow leg (see [`CapOverflow`]), which is the one permitted cap
/// violation so that the split always conserves the requested total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub venue: String,
    pub amount_in: Decimal,
    pub estimated_out: Decimal,
    /// Ordered token identifiers, length >= 2
    pub path: Vec<String>,
    /// Floor of `estimated_out` reduced by the slippage tolerance; the batch
    /// builder substitutes its own floor when absent.
    pub min_out: Option<Decimal>,
}

/// Marker for the one leg that was allowed to exceed its impact cap.
///
/// Informational, not an error: callers surface it to the user as a warning
/// while the split result remains valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapOverflow {
    pub venue: String,
    /// How far the leg's `amount_in` exceeds the pool's impact cap
    pub amount_over_cap: Decimal,
}

/// Aggregate prediction for a set of legs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub total_in: Decimal,
    pub total_out: Decimal,
    /// Derived from the first leg only; see the simulator docs for why this
    /// understates slippage on multi-leg splits.
    pub slippage_pct: Decimal,
    pub gas_estimate: u64,
    pub legs: Vec<RouteLeg>,
}

impl SimulationResult {
    /// Result for an empty leg set.
    pub fn empty() -> Self {
        Self {
            total_in: Decimal::ZERO,
            total_out: Decimal::ZERO,
            slippage_pct: Decimal::ZERO,
            gas_estimate: 0,
            legs: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pair_path() {
        let pair = TradePair::new("0xaaa", "0xbbb");
        assert_eq!(pair.path(), vec!["0xaaa".to_string(), "0xbbb".to_string()]);
    }

    #[test]
    fn test_leg_serde_round_trip() {
        let leg = RouteLeg {
            venue: "sushiswap".to_string(),
            amount_in: dec!(1500.5),
            estimated_out: dec!(749.25),
            path: vec!["0xaaa".to_string(), "0xbbb".to_string()],
            min_out: Some(dec!(745)),
        };
        let json = serde_json::to_string(&leg).unwrap();
        let back: RouteLeg = serde_json::from_str(&json).unwrap();
        assert_eq!(leg, back);
    }
}
