use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use routa_router::batch::BatchBuilder;
use routa_router::config::RouterConfig;
use routa_router::engine::{LoggingSettlement, RouterEngine, SettlementClient};
use routa_router::jitter::{FillStrategy, FullFill, SeededJitter};
use routa_router::optimizer::RouteRequest;
use routa_router::pool_store::{load_snapshot_file, PoolStore};
use routa_types::{PoolSnapshot, TradePair};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    info!("🚀 Starting Trade Router Service...");

    let config = RouterConfig::from_env();
    config.validate().context("invalid router configuration")?;

    // Load pool snapshots if a feed dump is available, otherwise fall back
    // to the built-in demo pair
    let store = Arc::new(PoolStore::new());
    let snapshot_path = std::path::PathBuf::from("./data/pool_snapshots.json");
    let pair = if snapshot_path.exists() {
        info!("📂 Loading pool snapshots from {:?}", snapshot_path);
        let (token_in, token_out, pools) = load_snapshot_file(&snapshot_path)?;
        for pool in pools {
            if let Err(e) = store.upsert(pool) {
                warn!("skipping pool: {e}");
            }
        }
        TradePair::new(token_in, token_out)
    } else {
        info!("no snapshot file found, using built-in demo pools");
        for pool in demo_pools() {
            store.upsert(pool)?;
        }
        TradePair::new(
            "0x00000000000000000000000000000000000000aa",
            "0x00000000000000000000000000000000000000bb",
        )
    };
    info!("✅ Pool store initialized with {} pools", store.len());

    let fill: Box<dyn FillStrategy + Send> = match std::env::var("ROUTA_JITTER_SEED") {
        Ok(seed) => {
            let seed = seed.parse::<u64>().context("invalid ROUTA_JITTER_SEED")?;
            info!("🎲 Allocation jitter enabled, seed {seed}");
            Box::new(SeededJitter::new(seed))
        }
        Err(_) => Box::new(FullFill),
    };

    let batch_builder = BatchBuilder::new(config.batch.clone());
    let (engine, mut handle) = RouterEngine::new(store.clone(), config, fill);
    let engine_task = tokio::spawn(engine.run());
    info!("✅ Router engine started");

    // One demo cycle: optimize -> simulate -> build -> submit
    let amount: Decimal = std::env::var("ROUTA_AMOUNT_IN")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(dec!(50000));

    handle.submit_request(RouteRequest {
        pair,
        amount_in: amount,
        max_slippage_bps: None,
    });

    let update = handle
        .next_update()
        .await
        .context("engine closed before publishing a quote")?;

    let quote = match update.result {
        Ok(quote) => quote,
        Err(e) => {
            // Blocking message naming the condition, never a partial result
            anyhow::bail!("routing failed: {e}");
        }
    };

    info!(
        "📊 Quote: {} legs, out={}, slippage={}%, gas={}, improvement={}%",
        quote.legs.len(),
        quote.simulation.total_out.round_dp(4),
        quote.simulation.slippage_pct.round_dp(4),
        quote.simulation.gas_estimate,
        quote.predicted_improvement_pct.round_dp(4),
    );
    if let Some(overflow) = &quote.risk.cap_overflow {
        warn!(
            "⚠️ impact cap bypassed on {} by {}",
            overflow.venue,
            overflow.amount_over_cap.round_dp(4)
        );
    }

    let payload = batch_builder.build(&quote.legs, &demo_router_map(), demo_recipient())?;
    info!(
        "🏗️ Batch: {} calls, condition '{}', deadline {}",
        payload.len(),
        payload.condition,
        payload.deadline
    );

    LoggingSettlement.submit(&payload).await?;
    info!("✅ Demo cycle complete");

    drop(handle);
    engine_task.await.context("engine task panicked")?;
    Ok(())
}

fn demo_pools() -> Vec<PoolSnapshot> {
    vec![
        PoolSnapshot::new("uniswap", dec!(1000000), dec!(500000), 25),
        PoolSnapshot::new("sushiswap", dec!(600000), dec!(298000), 30),
        PoolSnapshot::new("quickswap", dec!(250000), dec!(126000), 30),
    ]
}

fn demo_router_map() -> HashMap<String, String> {
    HashMap::from([
        (
            "uniswap".to_string(),
            "0x0000000000000000000000000000000000001001".to_string(),
        ),
        (
            "sushiswap".to_string(),
            "0x0000000000000000000000000000000000001002".to_string(),
        ),
        (
            "quickswap".to_string(),
            "0x0000000000000000000000000000000000001003".to_string(),
        ),
    ])
}

fn demo_recipient() -> &'static str {
    "0x00000000000000000000000000000000000000cc"
}
