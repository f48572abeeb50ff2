//! # Routa Types - Shared Trade Router Data Model
//!
//! ## Purpose
//!
//! Common data structures exchanged between the swap math library and the
//! router service: liquidity pool snapshots, split-trade legs, simulation
//! aggregates, and the atomic batch payload handed to the settlement layer.
//! All quantities are `rust_decimal::Decimal` in human units so the math
//! path carries no floating-point artifacts.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Pool snapshots from the price/liquidity feed adapter
//! - **Output Destinations**: Splitter, simulator and batch builder in the
//!   router service; serialized payloads for the settlement client
//! - **Serialization**: Serde derives throughout for snapshot files and
//!   payload hand-off
//!
//! ## Architecture Role
//!
//! Types sit at the bottom of the dependency graph; both `routa-amm` and
//! `routa-router` build on them and nothing here depends back on either.

pub mod batch;
pub mod pool;
pub mod route;

pub use batch::BatchPayload;
pub use pool::{PoolSnapshot, SnapshotError, StoreStats};
pub use route::{CapOverflow, RouteLeg, SimulationResult, TradePair};

/// Common numeric type for all pool and trade quantities
pub use rust_decimal::Decimal;
