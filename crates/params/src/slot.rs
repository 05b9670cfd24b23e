//! Parameters that define how wall-clock time maps onto slots and epochs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::default::{EPOCH_LENGTH, SLOT_DURATION_MS};

/// Timing parameters of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotParams {
    /// Wall-clock duration of a single slot in milliseconds.
    pub slot_duration_ms: u64,

    /// Number of slots in an epoch.
    pub epoch_length: u64,
}

impl SlotParams {
    /// Returns the slot duration as a [`Duration`].
    pub const fn slot_duration(&self) -> Duration {
        Duration::from_millis(self.slot_duration_ms)
    }
}

impl Default for SlotParams {
    fn default() -> Self {
        Self {
            slot_duration_ms: SLOT_DURATION_MS,
            epoch_length: EPOCH_LENGTH,
        }
    }
}
