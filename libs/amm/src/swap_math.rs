//! Constant-product swap math with exact calculations
//!
//! Preserves full precision using the Decimal type so allocation and
//! slippage figures are reproducible across runs.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

/// Typed failures of the swap math
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SwapError {
    /// The input-side reserve is zero or negative; the pool cannot quote
    #[error("no liquidity: input reserve {reserve_in} cannot absorb a swap")]
    NoLiquidity { reserve_in: Decimal },

    /// Negative amounts are rejected before any pool arithmetic
    #[error("invalid amount: {amount}")]
    InvalidAmount { amount: Decimal },
}

/// Constant-product math functions with zero precision loss
pub struct CpmmMath;

impl CpmmMath {
    /// Calculate the exact output amount for a constant-product swap.
    ///
    /// # Arguments
    /// * `amount_in` - Input amount in human units, must be >= 0
    /// * `reserve_in` - Input-side reserve, must be > 0
    /// * `reserve_out` - Output-side reserve
    /// * `fee_bps` - Fee in basis points, deducted from the input first
    ///
    /// # Returns
    /// Output amount after fee and curve impact. Zero input yields exactly
    /// zero output with no fee artifact.
    pub fn estimate_out(
        amount_in: Decimal,
        reserve_in: Decimal,
        reserve_out: Decimal,
        fee_bps: u32,
    ) -> Result<Decimal, SwapError> {
        if amount_in < Decimal::ZERO {
            return Err(SwapError::InvalidAmount { amount: amount_in });
        }
        if reserve_in <= Decimal::ZERO {
            return Err(SwapError::NoLiquidity { reserve_in });
        }
        if amount_in.is_zero() {
            return Ok(Decimal::ZERO);
        }

        let fee_multiplier = (Decimal::from(10_000u32) - Decimal::from(fee_bps)) / dec!(10000);
        let amount_in_with_fee = amount_in * fee_multiplier;

        // x*y=k: the product of reserves is preserved across the swap
        let new_reserve_in = reserve_in + amount_in_with_fee;
        let new_reserve_out = (reserve_in * reserve_out) / new_reserve_in;
        let amount_out = (reserve_out - new_reserve_out).max(Decimal::ZERO);

        Ok(amount_out)
    }

    /// Calculate the price impact of a trade as a percentage.
    ///
    /// Compares the spot price implied by the reserves with the price after
    /// the trade moves them (fee excluded, pure curve movement).
    pub fn price_impact(
        amount_in: Decimal,
        reserve_in: Decimal,
        reserve_out: Decimal,
    ) -> Result<Decimal, SwapError> {
        if reserve_in <= Decimal::ZERO {
            return Err(SwapError::NoLiquidity { reserve_in });
        }
        if amount_in < Decimal::ZERO {
            return Err(SwapError::InvalidAmount { amount: amount_in });
        }
        if amount_in.is_zero() || reserve_out.is_zero() {
            return Ok(Decimal::ZERO);
        }

        let price_before = reserve_out / reserve_in;

        let amount_out = Self::estimate_out(amount_in, reserve_in, reserve_out, 0)?;
        let price_after = (reserve_out - amount_out) / (reserve_in + amount_in);

        Ok((price_before - price_after).abs() / price_before * dec!(100))
    }

    /// Calculate slippage for a given trade size as a percentage.
    ///
    /// The difference between the output at the current spot rate (infinite
    /// liquidity) and the actual curve output, including the fee.
    pub fn slippage(
        amount_in: Decimal,
        reserve_in: Decimal,
        reserve_out: Decimal,
        fee_bps: u32,
    ) -> Result<Decimal, SwapError> {
        if reserve_in <= Decimal::ZERO {
            return Err(SwapError::NoLiquidity { reserve_in });
        }
        if amount_in < Decimal::ZERO {
            return Err(SwapError::InvalidAmount { amount: amount_in });
        }
        if amount_in.is_zero() || reserve_out.is_zero() {
            return Ok(Decimal::ZERO);
        }

        let ideal_output = amount_in * (reserve_out / reserve_in);
        let actual_output = Self::estimate_out(amount_in, reserve_in, reserve_out, fee_bps)?;

        Ok((ideal_output - actual_output) / ideal_output * dec!(100))
    }
}
