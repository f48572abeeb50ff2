//! Liquidity pool snapshots and store statistics
//!
//! A `PoolSnapshot` is a read-only observation of one venue's reserves and
//! fee at a point in time. The router never mutates a snapshot it receives;
//! every computation works over a cloned set.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures for pool snapshots
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SnapshotError {
    /// Reserves must be non-negative
    #[error("invalid reserves for venue {venue}: in={reserve_in}, out={reserve_out}")]
    InvalidReserves {
        venue: String,
        reserve_in: Decimal,
        reserve_out: Decimal,
    },

    /// Fee must stay below 100%
    #[error("invalid fee for venue {venue}: {fee_bps} bps (must be < 10000)")]
    InvalidFee { venue: String, fee_bps: u32 },
}

/// State of a single constant-product liquidity venue for one trading pair.
///
/// `reserve_in` is the side of the pair the trade pays in, `reserve_out` the
/// side it receives. `fee_bps` is deducted from the input amount before the
/// swap formula applies. A snapshot with `reserve_in == 0` has zero capacity
/// and is excluded from allocation, never treated as infinite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub venue: String,
    pub reserve_in: Decimal,
    pub reserve_out: Decimal,
    pub fee_bps: u32,
}

impl PoolSnapshot {
    pub fn new(
        venue: impl Into<String>,
        reserve_in: Decimal,
        reserve_out: Decimal,
        fee_bps: u32,
    ) -> Self {
        Self {
            venue: venue.into(),
            reserve_in,
            reserve_out,
            fee_bps,
        }
    }

    /// Check the snapshot invariants: non-negative reserves, fee < 10000 bps.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.reserve_in < Decimal::ZERO || self.reserve_out < Decimal::ZERO {
            return Err(SnapshotError::InvalidReserves {
                venue: self.venue.clone(),
                reserve_in: self.reserve_in,
                reserve_out: self.reserve_out,
            });
        }
        if self.fee_bps >= 10_000 {
            return Err(SnapshotError::InvalidFee {
                venue: self.venue.clone(),
                fee_bps: self.fee_bps,
            });
        }
        Ok(())
    }

    /// Maximum allocation this pool accepts under a per-pool impact cap:
    /// `floor(reserve_in * max_impact_pct / 100)`.
    pub fn impact_cap(&self, max_impact_pct: Decimal) -> Decimal {
        (self.reserve_in * max_impact_pct / Decimal::ONE_HUNDRED).floor()
    }

    /// Spot price implied by the reserves (out per in), if quotable.
    pub fn spot_price(&self) -> Option<Decimal> {
        if self.reserve_in > Decimal::ZERO {
            Some(self.reserve_out / self.reserve_in)
        } else {
            None
        }
    }
}

/// Aggregate statistics for a pool store
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_pools: usize,
    pub zero_reserve_pools: usize,
    pub total_updates: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_snapshot() {
        let pool = PoolSnapshot::new("uniswap", dec!(1000000), dec!(500000), 25);
        assert!(pool.validate().is_ok());
    }

    #[test]
    fn test_fee_at_ceiling_rejected() {
        let pool = PoolSnapshot::new("bad", dec!(100), dec!(100), 10_000);
        assert!(matches!(
            pool.validate(),
            Err(SnapshotError::InvalidFee { fee_bps: 10_000, .. })
        ));
    }

    #[test]
    fn test_negative_reserve_rejected() {
        let pool = PoolSnapshot::new("bad", dec!(-1), dec!(100), 30);
        assert!(matches!(
            pool.validate(),
            Err(SnapshotError::InvalidReserves { .. })
        ));
    }

    #[test]
    fn test_impact_cap_floors() {
        let pool = PoolSnapshot::new("uniswap", dec!(1005), dec!(2000), 30);
        // 1005 * 10 / 100 = 100.5 -> 100
        assert_eq!(pool.impact_cap(dec!(10)), dec!(100));
    }

    #[test]
    fn test_zero_reserve_has_zero_cap_and_no_price() {
        let pool = PoolSnapshot::new("empty", dec!(0), dec!(2000), 30);
        assert_eq!(pool.impact_cap(dec!(10)), dec!(0));
        assert!(pool.spot_price().is_none());
    }
}
