//! # Batch Builder - Atomic Multi-Call Construction
//!
//! ## Purpose
//!
//! Converts a leg list into the vendor-neutral [`BatchPayload`] submitted to
//! the settlement layer: one standardized swap call per resolvable venue, a
//! single aggregate output condition, and an absolute deadline. The builder
//! consumes legs by value semantics and never mutates them; the payload is
//! an independent object, built fresh per user action.
//!
//! ## Atomicity Contract
//!
//! The settlement layer accepting a payload must execute every call in
//! `targets`/`call_data` within a single atomic unit. If any individual call
//! reverts, or the aggregate condition evaluates false after all calls
//! complete, the entire unit is rolled back with no partial state change.
//! The builder relies on that guarantee and the core never re-checks it
//! after submission. The expected settlement entry point has the shape
//! `executeConditionalBatch(targets: address[], callData: bytes[],
//! condition: bytes, deadline: uint256)`.
//!
//! ## Partial Degradation
//!
//! A leg whose venue has no entry in the router map is dropped from the
//! payload rather than failing the batch. The aggregate condition still sums
//! the predicted output of ALL input legs, dropped ones included; a batch
//! degraded this way can therefore carry a condition that is unsatisfiable
//! at settlement time. That mismatch is a known risk of the reference
//! design, preserved deliberately; callers see the drop count in the logs.

use std::collections::HashMap;

use chrono::Utc;
use ethabi::{Address, ParamType, Token, Uint};
use routa_types::{BatchPayload, RouteLeg};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::config::BatchConfig;
use crate::error::RouteError;

/// Builds atomic batch payloads from split legs
#[derive(Debug, Clone)]
pub struct BatchBuilder {
    config: BatchConfig,
}

impl BatchBuilder {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Build an execution payload for `legs`.
    ///
    /// `router_map` resolves venue identifiers to router contract addresses;
    /// unresolved venues are dropped (see module docs). Fails with
    /// [`RouteError::NoValidRoutes`] when nothing remains to execute.
    pub fn build(
        &self,
        legs: &[RouteLeg],
        router_map: &HashMap<String, String>,
        recipient: &str,
    ) -> Result<BatchPayload, RouteError> {
        let recipient_addr = parse_address(recipient)?;
        let deadline = Utc::now().timestamp() + self.config.deadline_secs;

        let mut targets = Vec::with_capacity(legs.len());
        let mut call_data = Vec::with_capacity(legs.len());
        let mut dropped = 0usize;

        for leg in legs {
            let Some(router) = router_map.get(&leg.venue) else {
                warn!(venue = %leg.venue, "no router address for venue, dropping leg");
                dropped += 1;
                continue;
            };
            let router_addr = match parse_address(router) {
                Ok(addr) => addr,
                Err(_) => {
                    warn!(venue = %leg.venue, %router, "unparseable router address, dropping leg");
                    dropped += 1;
                    continue;
                }
            };

            let data = self.encode_swap_call(leg, recipient_addr, deadline)?;
            targets.push(format!("0x{}", hex::encode(router_addr)));
            call_data.push(format!("0x{}", hex::encode(data)));
        }

        if targets.is_empty() {
            return Err(RouteError::NoValidRoutes);
        }

        if dropped > 0 {
            warn!(
                dropped,
                encoded = targets.len(),
                "batch degraded: condition still covers all predicted outputs"
            );
        }

        // Aggregate condition over ALL input legs, dropped ones included.
        // Deliberately independent of the per-leg minimum outputs.
        let aggregate_out: Decimal = legs.iter().map(|leg| leg.estimated_out).sum();
        let minimum = (aggregate_out * dec!(0.995)).floor().normalize();

        debug!(
            calls = targets.len(),
            %minimum,
            deadline,
            "constructed batch payload"
        );

        Ok(BatchPayload {
            targets,
            call_data,
            condition: format!("outputs_sum >= {minimum}"),
            deadline,
        })
    }

    /// Encode one `swapExactTokensForTokens(uint256,uint256,address[],address,uint256)`
    /// call: selector followed by the ABI-encoded arguments.
    fn encode_swap_call(
        &self,
        leg: &RouteLeg,
        recipient: Address,
        deadline: i64,
    ) -> Result<Vec<u8>, RouteError> {
        let amount_in = self.scale(leg.amount_in, "leg amount_in")?;

        let min_out_units = leg
            .min_out
            .unwrap_or_else(|| (leg.estimated_out * dec!(0.995)).floor());
        let min_out = self.scale(min_out_units, "leg min_out")?;

        let path: Vec<Token> = leg
            .path
            .iter()
            .map(|token| parse_address(token).map(Token::Address))
            .collect::<Result<_, _>>()?;

        let arguments = [
            Token::Uint(amount_in),
            Token::Uint(min_out),
            Token::Array(path),
            Token::Address(recipient),
            Token::Uint(Uint::from(deadline as u64)),
        ];

        let mut data = ethabi::short_signature(
            "swapExactTokensForTokens",
            &[
                ParamType::Uint(256),
                ParamType::Uint(256),
                ParamType::Array(Box::new(ParamType::Address)),
                ParamType::Address,
                ParamType::Uint(256),
            ],
        )
        .to_vec();
        data.extend(ethabi::encode(&arguments));
        Ok(data)
    }

    /// Scale a human-unit amount into integer base units.
    fn scale(&self, amount: Decimal, context: &str) -> Result<Uint, RouteError> {
        let factor = Decimal::from_i128_with_scale(10i128.pow(self.config.token_decimals), 0);
        let scaled = amount
            .checked_mul(factor)
            .ok_or_else(|| RouteError::PrecisionOverflow {
                context: format!("{context}: {amount} at {} decimals", self.config.token_decimals),
            })?
            .floor();

        let units = scaled
            .to_u128()
            .ok_or_else(|| RouteError::PrecisionOverflow {
                context: format!("{context}: {scaled} does not fit base units"),
            })?;

        Ok(Uint::from(units))
    }
}

/// Parse a 20-byte hex address, with or without the `0x` prefix.
fn parse_address(value: &str) -> Result<Address, RouteError> {
    let cleaned = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    let mut bytes = [0u8; 20];
    hex::decode_to_slice(cleaned, &mut bytes).map_err(|_| RouteError::InvalidAddress {
        value: value.to_string(),
    })?;

    Ok(Address::from(bytes))
}
