//! # Router Engine - Recomputation Scheduling and Submission Boundary
//!
//! ## Purpose
//!
//! Coordinates the pure routing pipeline behind an explicit command/query
//! seam: requests enter through a handle, quotes leave through a result
//! channel, and the only asynchronous boundary is submission of a finished
//! payload to the external settlement layer.
//!
//! ## Supersede Semantics
//!
//! A new request supersedes, never queues behind, an in-flight recomputation
//! triggered by stale input. Requests travel over a `tokio::sync::watch`
//! channel, which keeps only the latest value; after computing, the engine
//! re-checks the channel and discards the result if a newer request arrived
//! in the meantime. No allocation state is cached between computations, and
//! each pass works over its own snapshot copy, so concurrent sessions never
//! share mutable state.

use std::sync::Arc;

use async_trait::async_trait;
use routa_types::BatchPayload;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::config::RouterConfig;
use crate::error::RouteError;
use crate::jitter::FillStrategy;
use crate::optimizer::{RouteQuote, RouteRequest, TradeOptimizer};
use crate::pool_store::PoolStore;

/// Submission boundary to the external settlement layer.
///
/// The implementation must guarantee atomic execution of the payload: every
/// call succeeds and the aggregate condition holds, or the whole batch
/// reverts. Failures surface as [`RouteError::Settlement`], opaque to the
/// core; retries, if any, belong to the implementation.
#[async_trait]
pub trait SettlementClient: Send + Sync {
    async fn submit(&self, payload: &BatchPayload) -> Result<(), RouteError>;
}

/// Demo settlement stub: logs the payload and accepts it.
pub struct LoggingSettlement;

#[async_trait]
impl SettlementClient for LoggingSettlement {
    async fn submit(&self, payload: &BatchPayload) -> Result<(), RouteError> {
        info!(
            calls = payload.len(),
            condition = %payload.condition,
            deadline = payload.deadline,
            "submitting batch to settlement layer"
        );
        Ok(())
    }
}

/// One published engine result: the request it answers and its outcome.
#[derive(Debug, Clone)]
pub struct EngineUpdate {
    pub request: RouteRequest,
    pub result: Result<RouteQuote, RouteError>,
}

/// Caller-side handle: submit requests, await the latest update.
pub struct EngineHandle {
    request_tx: watch::Sender<Option<RouteRequest>>,
    update_rx: watch::Receiver<Option<EngineUpdate>>,
}

impl EngineHandle {
    /// Replace whatever request is pending. The engine computes at most one
    /// quote per distinct request; intermediate requests may never produce
    /// an update at all.
    pub fn submit_request(&self, request: RouteRequest) {
        let _ = self.request_tx.send(Some(request));
    }

    /// Wait for the next published update.
    pub async fn next_update(&mut self) -> Option<EngineUpdate> {
        self.update_rx.changed().await.ok()?;
        self.update_rx.borrow_and_update().clone()
    }
}

/// Drives the optimizer over the pool store
pub struct RouterEngine {
    store: Arc<PoolStore>,
    optimizer: TradeOptimizer,
    fill: Box<dyn FillStrategy + Send>,
    request_rx: watch::Receiver<Option<RouteRequest>>,
    update_tx: watch::Sender<Option<EngineUpdate>>,
}

impl RouterEngine {
    pub fn new(
        store: Arc<PoolStore>,
        config: RouterConfig,
        fill: Box<dyn FillStrategy + Send>,
    ) -> (Self, EngineHandle) {
        let (request_tx, request_rx) = watch::channel(None);
        let (update_tx, update_rx) = watch::channel(None);

        let engine = Self {
            store,
            optimizer: TradeOptimizer::new(config),
            fill,
            request_rx,
            update_tx,
        };
        let handle = EngineHandle {
            request_tx,
            update_rx,
        };
        (engine, handle)
    }

    /// Run until every handle is dropped.
    pub async fn run(mut self) {
        info!("router engine started");

        while self.request_rx.changed().await.is_ok() {
            let Some(request) = self.request_rx.borrow_and_update().clone() else {
                continue;
            };

            let pools = self.store.snapshot();
            let result = self
                .optimizer
                .optimize(&request, &pools, self.fill.as_mut());

            // Last-request-wins: a result computed from stale input is
            // discarded, never published behind the newer request.
            if self.request_rx.has_changed().unwrap_or(false) {
                debug!(amount = %request.amount_in, "discarding superseded quote");
                continue;
            }

            let _ = self.update_tx.send(Some(EngineUpdate { request, result }));
        }

        info!("router engine stopped");
    }
}
