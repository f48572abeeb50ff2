//! Structured error types for the routing pipeline
//!
//! Every failure is a typed result; the core never signals a problem through
//! NaN, negative amounts, or an empty payload treated as success. The cap
//! overflow of the splitter is deliberately NOT here: it is informational and
//! travels inside [`routa_types::route::CapOverflow`], never as an `Err`.

use routa_amm::SwapError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Failures of the split/simulate/build pipeline
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RouteError {
    /// Requested amount is negative; rejected before any pool iteration
    #[error("invalid amount: {amount}")]
    InvalidAmount { amount: Decimal },

    /// All candidate pools have zero capacity or zero reserve
    #[error("no liquidity available for {pair}")]
    NoLiquidity { pair: String },

    /// Batch building found no leg with a resolvable router address
    #[error("no valid routes: no leg resolved a router address")]
    NoValidRoutes,

    /// An address string could not be parsed into 20 bytes
    #[error("invalid address: {value}")]
    InvalidAddress { value: String },

    /// A scaled amount exceeded the encodable integer range
    #[error("precision overflow in calculation: {context}")]
    PrecisionOverflow { context: String },

    /// Opaque failure from the external settlement layer; the core does not
    /// retry (retries belong to the submission collaborator)
    #[error("settlement failed: {reason}")]
    Settlement { reason: String },

    /// Swap math failure propagated from the AMM library
    #[error(transparent)]
    Swap(#[from] SwapError),
}
