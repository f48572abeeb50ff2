//! Atomic batch payload handed to the settlement layer
//!
//! The payload is vendor-neutral: an ordered list of call targets, the
//! matching encoded calldata, a single aggregate output condition, and an
//! absolute expiry. The settlement layer executes all calls in one atomic
//! unit; if any call reverts, or the condition evaluates false after all
//! calls complete, the whole unit is rolled back. The core only constructs
//! the payload and never re-checks the guarantee after submission.

use serde::{Deserialize, Serialize};

/// A constructed atomic-execution request.
///
/// Built fresh per user action from the current simulation, never mutated
/// after construction, and discarded after submission; there is no persistent
/// batch entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchPayload {
    /// Venue router contract addresses, one per encoded leg
    pub targets: Vec<String>,
    /// Hex-encoded calldata, same length and order as `targets`
    pub call_data: Vec<String>,
    /// Aggregate post-condition, `"outputs_sum >= <minimum>"`
    pub condition: String,
    /// Unix timestamp after which the batch must not execute
    pub deadline: i64,
}

impl BatchPayload {
    /// Number of calls in the batch.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.targets.len(), self.call_data.len());
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
