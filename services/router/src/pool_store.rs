//! In-memory pool snapshot store
//!
//! Holds the latest validated snapshot per venue for one trading pair.
//! Snapshots are supplied by the external price/liquidity feed; the router
//! only reads them. Insertion order is preserved because the splitter's
//! descending-capacity sort breaks ties by original input order, and that
//! order must survive a round-trip through the store.

use anyhow::{Context, Result};
use parking_lot::RwLock;
use routa_types::{PoolSnapshot, StoreStats};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Latest pool snapshots for a single trading pair
pub struct PoolStore {
    pools: RwLock<Vec<PoolSnapshot>>,
    stats: RwLock<StoreStats>,
}

impl PoolStore {
    pub fn new() -> Self {
        Self {
            pools: RwLock::new(Vec::new()),
            stats: RwLock::new(StoreStats::default()),
        }
    }

    /// Insert or replace the snapshot for a venue. Replacement keeps the
    /// venue's original position. Invalid snapshots are rejected.
    pub fn upsert(&self, snapshot: PoolSnapshot) -> Result<()> {
        snapshot.validate()?;

        let mut pools = self.pools.write();
        match pools.iter_mut().find(|pool| pool.venue == snapshot.venue) {
            Some(existing) => *existing = snapshot,
            None => pools.push(snapshot),
        }

        let mut stats = self.stats.write();
        stats.total_pools = pools.len();
        stats.zero_reserve_pools = pools
            .iter()
            .filter(|pool| pool.reserve_in.is_zero())
            .count();
        stats.total_updates += 1;

        Ok(())
    }

    /// Clone the current snapshot set in insertion order. Each computation
    /// works over its own copy; the store is never borrowed across a split.
    pub fn snapshot(&self) -> Vec<PoolSnapshot> {
        self.pools.read().clone()
    }

    pub fn get(&self, venue: &str) -> Option<PoolSnapshot> {
        self.pools.read().iter().find(|pool| pool.venue == venue).cloned()
    }

    pub fn stats(&self) -> StoreStats {
        self.stats.read().clone()
    }

    pub fn len(&self) -> usize {
        self.pools.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.read().is_empty()
    }
}

impl Default for PoolStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct SnapshotFileJson {
    version: u32,
    pair: PairJson,
    pools: Vec<PoolJson>,
}

#[derive(Debug, Deserialize)]
struct PairJson {
    token_in: String,
    token_out: String,
}

#[derive(Debug, Deserialize)]
struct PoolJson {
    venue: String,
    reserve_in: Decimal,
    reserve_out: Decimal,
    fee_bps: u32,
}

/// Load a pool snapshot file for the demo binary.
///
/// Entries that fail validation are skipped with a warning rather than
/// failing the whole file.
pub fn load_snapshot_file(path: &Path) -> Result<(String, String, Vec<PoolSnapshot>)> {
    info!("loading pool snapshots from {:?}", path);

    let contents = std::fs::read_to_string(path).context("failed to read snapshot file")?;
    let file: SnapshotFileJson =
        serde_json::from_str(&contents).context("failed to parse snapshot JSON")?;

    info!(
        "snapshot file v{} holds {} pools for {}/{}",
        file.version,
        file.pools.len(),
        file.pair.token_in,
        file.pair.token_out
    );

    let mut snapshots = Vec::with_capacity(file.pools.len());
    for entry in file.pools {
        let snapshot = PoolSnapshot::new(
            entry.venue,
            entry.reserve_in,
            entry.reserve_out,
            entry.fee_bps,
        );
        match snapshot.validate() {
            Ok(()) => snapshots.push(snapshot),
            Err(e) => warn!("skipping invalid pool snapshot: {e}"),
        }
    }

    Ok((file.pair.token_in, file.pair.token_out, snapshots))
}
