//! A slot source that only moves when told to.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use shadow_params::slot::SlotParams;

use crate::SlotSource;

/// A [`SlotSource`] whose current slot is set by hand.
#[derive(Debug)]
pub struct ManualSlots {
    slot: AtomicU64,
    slot_duration: Duration,
}

impl ManualSlots {
    /// Creates a source at slot 0 with the default slot duration.
    pub fn new() -> Self {
        Self::at(0)
    }

    /// Creates a source at the given slot with the default slot duration.
    pub fn at(slot: u64) -> Self {
        Self {
            slot: AtomicU64::new(slot),
            slot_duration: SlotParams::default().slot_duration(),
        }
    }

    /// Jumps to the given slot.
    pub fn set(&self, slot: u64) {
        self.slot.store(slot, Ordering::SeqCst);
    }

    /// Moves forward by `slots`.
    pub fn advance(&self, slots: u64) {
        self.slot.fetch_add(slots, Ordering::SeqCst);
    }
}

impl Default for ManualSlots {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotSource for ManualSlots {
    fn current_slot(&self) -> u64 {
        self.slot.load(Ordering::SeqCst)
    }

    fn slot_duration(&self) -> Duration {
        self.slot_duration
    }
}
