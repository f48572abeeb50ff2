//! # Routa Router - Trade-Splitting Optimizer and Atomic-Batch Builder
//!
//! ## Purpose
//!
//! Core routing service for the cross-exchange demo router: splits a trade
//! across constant-product liquidity venues under per-pool impact caps,
//! predicts the aggregate execution result, and encodes the legs into a
//! single all-or-nothing multi-call payload with a numeric post-condition.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Pool snapshots from the external price/liquidity
//!   feed, route requests from the UI layer
//! - **Output Destinations**: Quotes back to the caller, batch payloads to
//!   the external settlement client
//! - **Math Libraries**: `routa-amm` for all swap curve arithmetic
//! - **State Dependencies**: Read-only snapshot copies per computation; no
//!   shared mutable state between concurrent invocations
//!
//! ## Architecture Role
//!
//! ```text
//! Pool Snapshots → [Splitter] → [Simulator] → [Batch Builder] → Settlement
//!       ↓              ↓             ↓               ↓              ↓
//! Feed Adapter    Capped Legs   Predicted      Multi-Call      Atomic
//! Read-Only Data  Greedy Order  Totals/Gas     + Condition     Execution
//! ```
//!
//! Everything up to submission is synchronous and pure; the engine adds the
//! command/query seam and last-request-wins recomputation on top.

pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
pub mod jitter;
pub mod optimizer;
pub mod pool_store;
pub mod simulator;
pub mod splitter;

pub use batch::BatchBuilder;
pub use config::RouterConfig;
pub use engine::{EngineHandle, EngineUpdate, LoggingSettlement, RouterEngine, SettlementClient};
pub use error::RouteError;
pub use jitter::{FillStrategy, FullFill, SeededJitter};
pub use optimizer::{RiskMetrics, RouteQuote, RouteRequest, TradeOptimizer};
pub use pool_store::PoolStore;
pub use simulator::ExecutionSimulator;
pub use splitter::{RouteSplitter, SplitOutcome};
