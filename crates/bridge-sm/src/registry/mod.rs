//! The registry of all bridge deposits made since the node started.
//!
//! The registry is the sole owner of the deposit records. Callers only ever receive projections,
//! i.e. clones with the derived fields filled in for the slot at which they were taken. The only
//! way to change a record is a successful [`withdraw`](BridgeRegistry::withdraw).
//!
//! Every operation holds a single lock for its whole duration so that the read, derive and write
//! steps of a withdrawal cannot interleave with any other operation.

pub mod errors;
pub mod stats;


use std::collections::HashMap;

use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shadow_params::privacy::PrivacyLevel;
use shadow_slot_clock::SlotSource;
use tracing::{debug, info, warn};

use crate::{
    config::BridgeCfg,
    deposit::{id::BridgeId, machine::BridgeDeposit},
    registry::{
        errors::{RegistryError, RegistryResult},
        stats::{RegistryStats, StatsBuilder},
    },
};

/// The outcome of a successful withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalReceipt {
    /// The id of the withdrawn deposit.
    pub bridge_id: BridgeId,

    /// The amount paid out in base units, after fees.
    pub withdrawn_amount: u64,

    /// The fee withheld in base units.
    pub fee: u64,

    /// The slot at which the withdrawal happened.
    pub withdrawal_slot: u64,

    /// A human-readable summary, e.g. `"Withdrew 9.99 SHOL"`.
    pub message: String,
}

/// The records, kept in insertion order, along with an index by id.
#[derive(Debug, Default)]
struct RegistryState {
    deposits: Vec<BridgeDeposit>,
    index: HashMap<BridgeId, usize>,
    total_volume: u64,
}

impl RegistryState {
    fn get(&self, bridge_id: &str) -> Option<&BridgeDeposit> {
        self.index.get(bridge_id).map(|&idx| &self.deposits[idx])
    }

    fn get_mut(&mut self, bridge_id: &str) -> Option<&mut BridgeDeposit> {
        self.index
            .get(bridge_id)
            .copied()
            .map(move |idx| &mut self.deposits[idx])
    }

    fn insert(&mut self, deposit: BridgeDeposit) {
        self.index
            .insert(deposit.bridge_id().clone(), self.deposits.len());
        self.deposits.push(deposit);
    }
}

/// The registry of all bridge deposits.
#[derive(Debug)]
pub struct BridgeRegistry<S> {
    cfg: BridgeCfg,
    slots: S,
    state: Mutex<RegistryState>,
}

impl<S: SlotSource> BridgeRegistry<S> {
    /// Creates an empty registry that reads the time from `slots`.
    pub fn new(cfg: BridgeCfg, slots: S) -> Self {
        Self {
            cfg,
            slots,
            state: Mutex::new(RegistryState::default()),
        }
    }

    /// Returns the bridge configuration.
    pub const fn cfg(&self) -> &BridgeCfg {
        &self.cfg
    }

    /// Returns the slot source of the registry.
    pub const fn slots(&self) -> &S {
        &self.slots
    }

    /// Accepts a new deposit and returns its id.
    ///
    /// The depositor is stored exactly as given but must not be blank.
    ///
    /// Unknown or missing privacy levels fall back to [`PrivacyLevel::Standard`].
    pub fn create(
        &self,
        depositor: &str,
        amount: u64,
        privacy_level: Option<&str>,
    ) -> RegistryResult<BridgeId> {
        if depositor.trim().is_empty() {
            return Err(RegistryError::InvalidInput(
                "depositor must not be empty".to_string(),
            ));
        }

        let level = PrivacyLevel::resolve(privacy_level);
        if let Some(requested) = privacy_level.filter(|name| *name != level.as_str()) {
            warn!(%requested, fallback = %level, "unknown privacy level");
        }
        let privacy_config = *self.cfg.privacy.get(level);

        let mut state = self.state.lock();

        let total_volume = state.total_volume.checked_add(amount).ok_or_else(|| {
            RegistryError::InvalidInput(format!(
                "amount {amount} overflows the total bridge volume"
            ))
        })?;

        let current_slot = self.slots.current_slot();
        let now = Utc::now();
        let received_at_nanos = now.timestamp_nanos_opt().unwrap_or_default();

        let mut nonce = 0;
        let bridge_id = loop {
            let candidate = BridgeId::derive(depositor, amount, level, received_at_nanos, nonce);
            if !state.index.contains_key(candidate.as_str()) {
                break candidate;
            }

            debug!(%candidate, %nonce, "bridge id collision, rehashing");
            nonce += 1;
        };

        let deposit = BridgeDeposit::new(
            bridge_id.clone(),
            depositor.to_string(),
            amount,
            current_slot,
            now.timestamp(),
            level,
            privacy_config,
            &self.cfg.mixing,
        );

        state.insert(deposit);
        state.total_volume = total_volume;

        info!(
            %bridge_id,
            %depositor,
            %amount,
            %level,
            deposit_slot = %current_slot,
            "accepted bridge deposit"
        );

        Ok(bridge_id)
    }

    /// Returns the deposit with its status derived for the current slot.
    pub fn status(&self, bridge_id: &str) -> RegistryResult<BridgeDeposit> {
        let state = self.state.lock();

        let deposit = state
            .get(bridge_id)
            .ok_or_else(|| RegistryError::NotFound(bridge_id.to_string()))?;

        Ok(self.project(deposit, self.slots.current_slot()))
    }

    /// Withdraws a deposit to `withdrawal_address`, which is recorded as given.
    ///
    /// Only succeeds if the status derived for the current slot is
    /// [`ReadyToWithdraw`](crate::deposit::state::DepositStatus::ReadyToWithdraw); in every
    /// other case the registry is left untouched.
    pub fn withdraw(
        &self,
        bridge_id: &str,
        withdrawal_address: &str,
    ) -> RegistryResult<WithdrawalReceipt> {
        let mut state = self.state.lock();
        let current_slot = self.slots.current_slot();
        let slot_duration = self.slots.slot_duration();
        let mixing = &self.cfg.mixing;

        let deposit = state
            .get_mut(bridge_id)
            .ok_or_else(|| RegistryError::NotFound(bridge_id.to_string()))?;

        let progress = deposit.progress_at(current_slot, slot_duration, mixing);
        if !progress.status.is_withdrawable() {
            debug!(%bridge_id, status = %progress.status, "rejected early withdrawal");
            return Err(RegistryError::NotReady {
                bridge_id: bridge_id.to_string(),
                status: progress.status,
            });
        }

        let amount = deposit.amount();
        let fee = mixing.withdrawal_fee(amount);
        let withdrawn_amount = amount - fee;

        deposit.complete(withdrawal_address.to_string(), current_slot, progress);

        info!(
            %bridge_id,
            %withdrawal_address,
            %withdrawn_amount,
            %fee,
            withdrawal_slot = %current_slot,
            "completed bridge withdrawal"
        );

        Ok(WithdrawalReceipt {
            bridge_id: deposit.bridge_id().clone(),
            withdrawn_amount,
            fee,
            withdrawal_slot: current_slot,
            message: format!("Withdrew {}", mixing.format_amount(withdrawn_amount)),
        })
    }

    /// Returns every deposit made by or withdrawn to `address`, in the order they were made.
    pub fn list_by_address(&self, address: &str) -> Vec<BridgeDeposit> {
        let state = self.state.lock();
        let current_slot = self.slots.current_slot();

        state
            .deposits
            .iter()
            .filter(|deposit| deposit.involves(address))
            .map(|deposit| self.project(deposit, current_slot))
            .collect()
    }

    /// Returns every deposit, in the order they were made.
    pub fn list_all(&self) -> Vec<BridgeDeposit> {
        let state = self.state.lock();
        let current_slot = self.slots.current_slot();

        state
            .deposits
            .iter()
            .map(|deposit| self.project(deposit, current_slot))
            .collect()
    }

    /// Returns aggregate statistics with every deposit projected to the current slot.
    pub fn stats(&self) -> RegistryStats {
        let state = self.state.lock();
        let current_slot = self.slots.current_slot();
        let slot_duration = self.slots.slot_duration();

        let mut builder = StatsBuilder::default();
        for deposit in &state.deposits {
            let progress = deposit.progress_at(current_slot, slot_duration, &self.cfg.mixing);
            builder.add(
                !progress.status.is_terminal(),
                progress.anonymity_set_size,
                deposit.privacy_config().delay_hours,
            );
        }

        builder.build(state.total_volume)
    }

    /// Returns the sum of all amounts ever deposited.
    pub fn total_volume(&self) -> u64 {
        self.state.lock().total_volume
    }

    /// Returns the number of deposits ever made.
    pub fn len(&self) -> usize {
        self.state.lock().deposits.len()
    }

    /// Whether no deposit has been made yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn project(&self, deposit: &BridgeDeposit, current_slot: u64) -> BridgeDeposit {
        deposit.project(current_slot, self.slots.slot_duration(), &self.cfg.mixing)
    }
}
