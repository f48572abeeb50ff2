//! # Routa AMM Library - Constant-Product Swap Mathematics
//!
//! ## Purpose
//!
//! Exact-arithmetic swap math for constant-product liquidity pools: output
//! estimation under a proportional input fee, price impact, and slippage.
//! Every quantity is a `rust_decimal::Decimal`, so the hot path carries no
//! floating-point rounding and can never produce NaN or infinity.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Pool reserves and fee tiers from snapshot data
//! - **Output Destinations**: Route splitter and trade optimizer in the
//!   router service
//! - **Precision**: Zero precision loss via Decimal arithmetic
//! - **Validation**: Typed errors for zero-reserve and negative-amount inputs
//!
//! ## Architecture Role
//!
//! The AMM library is the mathematical foundation for allocation decisions;
//! it holds no state and performs no I/O.

pub mod swap_math;

pub use swap_math::{CpmmMath, SwapError};

/// Common types for AMM calculations
pub use rust_decimal::Decimal;
