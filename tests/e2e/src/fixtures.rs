//! Canonical pool sets and addresses shared across scenario tests

use std::collections::HashMap;

use routa_types::{PoolSnapshot, TradePair};
use rust_decimal_macros::dec;

pub const TOKEN_IN: &str = "0x00000000000000000000000000000000000000aa";
pub const TOKEN_OUT: &str = "0x00000000000000000000000000000000000000bb";
pub const RECIPIENT: &str = "0x00000000000000000000000000000000000000cc";

pub fn demo_pair() -> TradePair {
    TradePair::new(TOKEN_IN, TOKEN_OUT)
}

/// The reference pool of the swap-calculator fixture: 1M:500k at 25 bps.
pub fn reference_pool() -> PoolSnapshot {
    PoolSnapshot::new("uniswap", dec!(1000000), dec!(500000), 25)
}

/// Three pools whose impact caps at 10% are exactly 50k, 30k and 20k.
/// Input order deliberately differs from capacity order.
pub fn capped_pools() -> Vec<PoolSnapshot> {
    vec![
        PoolSnapshot::new("quickswap", dec!(200000), dec!(100000), 30),
        PoolSnapshot::new("uniswap", dec!(500000), dec!(250000), 25),
        PoolSnapshot::new("sushiswap", dec!(300000), dec!(150000), 30),
    ]
}

/// Router addresses for every demo venue.
pub fn full_router_map() -> HashMap<String, String> {
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
