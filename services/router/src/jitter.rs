//! Pluggable fill-factor strategies for the route splitter
//!
//! The reference router optionally scales each greedy take by a quality
//! factor in [0.6, 1.0] so demo allocations look organic. That behavior is
//! modeled here as an explicit, caller-supplied strategy: the splitter never
//! reads hidden global RNG state, so identical seeds reproduce identical
//! splits.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

/// Source of the per-take fill factor used by the splitter.
///
/// Implementations must return factors in [0.6, 1.0]. The factor scales the
/// amount taken from a pool below its cap; the overflow fallback leg never
/// applies it, so conservation of the requested total always holds.
pub trait FillStrategy {
    fn fill_factor(&mut self) -> Decimal;
}

/// Deterministic strategy that always fills to the cap (factor 1).
///
/// This is the default for production-style routing and for tests that
/// assert exact allocations.
#[derive(Debug, Default, Clone, Copy)]
pub struct FullFill;

impl FillStrategy for FullFill {
    fn fill_factor(&mut self) -> Decimal {
        Decimal::ONE
    }
}

/// Seeded pseudo-random factor in [0.6, 1.0].
///
/// Factors are drawn in whole basis points so the sequence is exactly
/// reproducible for a given seed across platforms.
#[derive(Debug)]
pub struct SeededJitter {
    rng: StdRng,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl FillStrategy for SeededJitter {
    fn fill_factor(&mut self) -> Decimal {
        let bps: u32 = self.rng.gen_range(6_000..=10_000);
        Decimal::from(bps) / Decimal::from(10_000u32)
    }
}
