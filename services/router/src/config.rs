//! Router configuration with runtime parameter control
//!
//! Serde-backed configuration for all routing components: defaults suitable
//! for the demo deployment, JSON file loading, environment variable
//! overrides, and validation with detailed error reporting.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Complete configuration for the trade router service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Allocation parameters
    pub splitter: SplitterConfig,
    /// Aggregation parameters
    pub simulator: SimulatorConfig,
    /// Batch construction parameters
    pub batch: BatchConfig,
}

/// Configuration for the route splitter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitterConfig {
    /// Per-pool price-impact cap as a percentage of the input reserve
    /// (e.g. 10 = a pool absorbs at most 10% of its input-side reserve)
    pub max_impact_pct: Decimal,
    /// Slippage tolerance applied to each leg's minimum output, in basis
    /// points (e.g. 50 = 0.5%)
    pub slippage_tolerance_bps: u32,
}

/// Configuration for the execution simulator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Fixed base cost of a batch in gas units
    pub gas_base: u64,
    /// Marginal gas cost per leg
    pub gas_per_leg: u64,
}

/// Configuration for the batch builder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Seconds from construction until the batch expires
    pub deadline_secs: i64,
    /// Decimal places used to scale human-unit amounts into base units
    pub token_decimals: u32,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            splitter: SplitterConfig::default(),
            simulator: SimulatorConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            max_impact_pct: dec!(10),
            slippage_tolerance_bps: 50, // 0.5%
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            gas_base: 100_000,
            gas_per_leg: 120_000, // one router hop per leg
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            deadline_secs: 600, // 10 minutes
            token_decimals: 18,
        }
    }
}

impl RouterConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(max_impact) = std::env::var("ROUTA_MAX_IMPACT_PCT") {
            if let Ok(value) = max_impact.parse::<Decimal>() {
                config.splitter.max_impact_pct = value;
            }
        }

        if let Ok(tolerance) = std::env::var("ROUTA_SLIPPAGE_TOLERANCE_BPS") {
            if let Ok(value) = tolerance.parse::<u32>() {
                config.splitter.slippage_tolerance_bps = value;
            }
        }

        if let Ok(deadline) = std::env::var("ROUTA_DEADLINE_SECS") {
            if let Ok(value) = deadline.parse::<i64>() {
                config.batch.deadline_secs = value;
            }
        }

        if let Ok(decimals) = std::env::var("ROUTA_TOKEN_DECIMALS") {
            if let Ok(value) = decimals.parse::<u32>() {
                config.batch.token_decimals = value;
            }
        }

        config
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.splitter.max_impact_pct <= dec!(0) || self.splitter.max_impact_pct > dec!(100) {
            anyhow::bail!("max_impact_pct must be in (0, 100]");
        }

        if self.splitter.slippage_tolerance_bps >= 10_000 {
            anyhow::bail!("slippage_tolerance_bps must be < 10000 (100%)");
        }

        if self.batch.deadline_secs <= 0 {
            anyhow::bail!("deadline_secs must be positive");
        }

        if self.batch.token_decimals > 28 {
            anyhow::bail!("token_decimals must be <= 28 to stay within Decimal range");
        }

        Ok(())
    }
}
