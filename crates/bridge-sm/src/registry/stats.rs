//! Aggregate statistics over all deposits.

use serde::{Deserialize, Serialize};

/// A snapshot of the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryStats {
    /// Sum of all amounts ever deposited.
    pub total_volume: u64,

    /// Number of deposits that have not been withdrawn.
    pub active_deposits: u32,

    /// Sum of the current anonymity sets of all deposits.
    pub anonymity_set: u64,

    /// Mean privacy delay across all deposits, 0 when there are none.
    pub average_delay_hours: f64,
}

/// Incrementally builds [`RegistryStats`].
#[derive(Debug, Default)]
pub(crate) struct StatsBuilder {
    deposits: u64,
    active_deposits: u32,
    anonymity_set: u64,
    delay_hours: f64,
}

impl StatsBuilder {
    /// Accounts for one deposit.
    pub(crate) fn add(&mut self, active: bool, anonymity_set_size: u64, delay_hours: f64) {
        self.deposits += 1;
        if active {
            self.active_deposits = self.active_deposits.saturating_add(1);
        }
        self.anonymity_set = self.anonymity_set.saturating_add(anonymity_set_size);
        self.delay_hours += delay_hours;
    }

    /// Finishes the snapshot.
    pub(crate) fn build(self, total_volume: u64) -> RegistryStats {
        RegistryStats {
            total_volume,
            active_deposits: self.active_deposits,
            anonymity_set: self.anonymity_set,
            average_delay_hours: self.delay_hours / self.deposits.max(1) as f64,
        }
    }
}
