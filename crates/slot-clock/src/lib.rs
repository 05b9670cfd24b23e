//! Converts elapsed wall-clock time into slots and epochs.
//!
//! The clock captures a start instant once and derives everything else on demand:
//!
//! ```text
//! slot          = floor((now - start) / slot_duration)
//! epoch         = slot / epoch_length
//! slot_in_epoch = slot % epoch_length
//! ```
//!
//! The start instant comes from a monotonic clock, so the current slot never decreases within a
//! process lifetime. Nothing is persisted: a restarted node starts again at slot 0.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};
use shadow_params::slot::SlotParams;

#[cfg(any(test, feature = "test-utils"))]
mod manual;

#[cfg(any(test, feature = "test-utils"))]
pub use manual::ManualSlots;

/// Anything that can tell the current slot.
///
/// The deposit registry is generic over this so that tests can move time forward by hand.
pub trait SlotSource: Send + Sync {
    /// Returns the current slot.
    fn current_slot(&self) -> u64;

    /// Returns the wall-clock duration of a single slot.
    fn slot_duration(&self) -> Duration;
}

impl<T: SlotSource + ?Sized> SlotSource for Arc<T> {
    fn current_slot(&self) -> u64 {
        (**self).current_slot()
    }

    fn slot_duration(&self) -> Duration {
        (**self).slot_duration()
    }
}

/// A slot together with its epoch coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPosition {
    /// The absolute slot number.
    pub slot: u64,

    /// The epoch the slot belongs to.
    pub epoch: u64,

    /// The offset of the slot within its epoch.
    pub slot_in_epoch: u64,
}

/// The process-wide slot clock.
#[derive(Debug, Clone)]
pub struct SlotClock {
    start: Instant,
    params: SlotParams,
}

impl SlotClock {
    /// Creates a clock that starts counting from now.
    pub fn new(params: SlotParams) -> Self {
        Self::with_start(Instant::now(), params)
    }

    /// Creates a clock that counts from the given start instant.
    pub const fn with_start(start: Instant, params: SlotParams) -> Self {
        Self { start, params }
    }

    /// Returns the parameters this clock was created with.
    pub const fn params(&self) -> &SlotParams {
        &self.params
    }

    /// Returns the slot at the given instant.
    ///
    /// Instants before the start of the clock map to slot 0.
    pub fn slot_at(&self, now: Instant) -> u64 {
        let elapsed_ms = now.saturating_duration_since(self.start).as_millis();
        let slot = elapsed_ms / u128::from(self.params.slot_duration_ms.max(1));

        u64::try_from(slot).unwrap_or(u64::MAX)
    }

    /// Returns the current slot.
    pub fn now_slot(&self) -> u64 {
        self.slot_at(Instant::now())
    }

    /// Returns the epoch the given slot belongs to.
    pub const fn epoch_of(&self, slot: u64) -> u64 {
        slot / self.epoch_length()
    }

    /// Returns the offset of the given slot within its epoch.
    pub const fn position_in_epoch(&self, slot: u64) -> u64 {
        slot % self.epoch_length()
    }

    /// Returns the full position of the given slot.
    pub const fn position_of(&self, slot: u64) -> SlotPosition {
        SlotPosition {
            slot,
            epoch: self.epoch_of(slot),
            slot_in_epoch: self.position_in_epoch(slot),
        }
    }

    /// Returns how long the clock has been running.
    pub fn uptime(&self) -> Duration {
        self.start.elapsed()
    }

    const fn epoch_length(&self) -> u64 {
        if self.params.epoch_length == 0 {
            1
        } else {
            self.params.epoch_length
        }
    }
}

impl SlotSource for SlotClock {
    fn current_slot(&self) -> u64 {
        self.now_slot()
    }

    fn slot_duration(&self) -> Duration {
        self.params.slot_duration()
    }
}
