//! The bridge deposit record and the function that derives its status from the current slot.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use shadow_params::{
    mixing::MixingParams,
    privacy::{PrivacyConfig, PrivacyLevel},
};

use crate::deposit::{id::BridgeId, score::privacy_score, state::DepositStatus};

/// Milliseconds in a minute, the unit the hop rate is expressed in.
const MS_PER_MINUTE: u128 = 60_000;

/// Seconds in an hour, the unit privacy delays are expressed in.
const SECS_PER_HOUR: f64 = 3_600.0;

/// The mixing progress of a deposit at a given slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixingProgress {
    /// The derived status.
    pub status: DepositStatus,

    /// The number of hops completed so far.
    pub hops_completed: u64,

    /// The anonymity set the deposit is mixed into so far.
    pub anonymity_set_size: u64,
}

/// A deposit into the privacy bridge.
///
/// The identity, the amount and the privacy configuration are fixed when the deposit is created.
/// The status, the number of completed hops and the anonymity set are only meaningful on a
/// projection obtained from [`BridgeDeposit::project`], except once the deposit is
/// [`Completed`](DepositStatus::Completed), at which point they are frozen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeDeposit {
    bridge_id: BridgeId,
    depositor: String,
    amount: u64,
    deposit_slot: u64,
    deposit_time: i64,
    status: DepositStatus,
    privacy_level: PrivacyLevel,
    privacy_config: PrivacyConfig,
    mixing_hops_completed: u64,
    total_hops: u64,
    withdrawal_address: Option<String>,
    withdrawal_slot: Option<u64>,
    anonymity_set_size: u64,
    privacy_score: u64,
}

impl BridgeDeposit {
    /// Creates a freshly accepted deposit.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        bridge_id: BridgeId,
        depositor: String,
        amount: u64,
        deposit_slot: u64,
        deposit_time: i64,
        privacy_level: PrivacyLevel,
        privacy_config: PrivacyConfig,
        mixing: &MixingParams,
    ) -> Self {
        Self {
            bridge_id,
            depositor,
            amount,
            deposit_slot,
            deposit_time,
            status: DepositStatus::Deposited,
            privacy_level,
            privacy_config,
            mixing_hops_completed: 0,
            total_hops: privacy_config.hop_count,
            withdrawal_address: None,
            withdrawal_slot: None,
            anonymity_set_size: mixing.base_anonymity_set,
            privacy_score: privacy_score(&privacy_config),
        }
    }

    /// Returns the id of the deposit.
    pub const fn bridge_id(&self) -> &BridgeId {
        &self.bridge_id
    }

    /// Returns the address that made the deposit.
    pub fn depositor(&self) -> &str {
        &self.depositor
    }

    /// Returns the deposited amount in base units.
    pub const fn amount(&self) -> u64 {
        self.amount
    }

    /// Returns the slot at which the deposit was accepted.
    pub const fn deposit_slot(&self) -> u64 {
        self.deposit_slot
    }

    /// Returns the unix timestamp (seconds) at which the deposit was accepted.
    pub const fn deposit_time(&self) -> i64 {
        self.deposit_time
    }

    /// Returns the status as of the last projection or the stored terminal status.
    pub const fn status(&self) -> DepositStatus {
        self.status
    }

    /// Returns the privacy tier the deposit was made with.
    pub const fn privacy_level(&self) -> PrivacyLevel {
        self.privacy_level
    }

    /// Returns the privacy configuration the deposit was made with.
    pub const fn privacy_config(&self) -> &PrivacyConfig {
        &self.privacy_config
    }

    /// Returns the number of hops completed as of the last projection.
    pub const fn mixing_hops_completed(&self) -> u64 {
        self.mixing_hops_completed
    }

    /// Returns the total number of hops.
    pub const fn total_hops(&self) -> u64 {
        self.total_hops
    }

    /// Returns the address the deposit was withdrawn to, if any.
    pub fn withdrawal_address(&self) -> Option<&str> {
        self.withdrawal_address.as_deref()
    }

    /// Returns the slot at which the deposit was withdrawn, if any.
    pub const fn withdrawal_slot(&self) -> Option<u64> {
        self.withdrawal_slot
    }

    /// Returns the anonymity set size as of the last projection.
    pub const fn anonymity_set_size(&self) -> u64 {
        self.anonymity_set_size
    }

    /// Returns the privacy score computed at creation.
    pub const fn privacy_score(&self) -> u64 {
        self.privacy_score
    }

    /// Whether `address` made or received this deposit.
    pub fn involves(&self, address: &str) -> bool {
        self.depositor == address || self.withdrawal_address.as_deref() == Some(address)
    }

    /// Derives the mixing progress at `current_slot`.
    ///
    /// Hops complete at `hop_rate_per_minute` per minute elapsed since the deposit slot. Once all
    /// hops are done the deposit waits until
    /// `deposit_slot + delay_slots + total_hops * slots_per_hop`, where `delay_slots` is the
    /// privacy delay expressed in slots and rounded down.
    ///
    /// A [`Completed`](DepositStatus::Completed) deposit reports its frozen values.
    pub fn progress_at(
        &self,
        current_slot: u64,
        slot_duration: Duration,
        mixing: &MixingParams,
    ) -> MixingProgress {
        if self.status.is_terminal() {
            return MixingProgress {
                status: self.status,
                hops_completed: self.mixing_hops_completed,
                anonymity_set_size: self.anonymity_set_size,
            };
        }

        let slots_elapsed = current_slot.saturating_sub(self.deposit_slot);
        let elapsed_ms = u128::from(slots_elapsed) * slot_duration.as_millis();
        let hops = elapsed_ms * u128::from(mixing.hop_rate_per_minute) / MS_PER_MINUTE;
        let hops_completed = hops.min(u128::from(self.total_hops)) as u64;

        if hops_completed < self.total_hops {
            return MixingProgress {
                status: DepositStatus::Mixing {
                    current_hop: hops_completed + 1,
                    total_hops: self.total_hops,
                },
                hops_completed,
                anonymity_set_size: mixing.anonymity_set_after(hops_completed),
            };
        }

        let ready_at_slot = self.ready_at_slot(slot_duration, mixing);
        let status = if current_slot >= ready_at_slot {
            DepositStatus::ReadyToWithdraw
        } else {
            DepositStatus::WaitingDelay { ready_at_slot }
        };

        MixingProgress {
            status,
            hops_completed: self.total_hops,
            anonymity_set_size: mixing.anonymity_set_after(self.total_hops),
        }
    }

    /// Returns the first slot at which the deposit can be withdrawn.
    pub fn ready_at_slot(&self, slot_duration: Duration, mixing: &MixingParams) -> u64 {
        // Saturating float-to-int cast: a zero slot duration means "never".
        let delay_slots = (self.privacy_config.delay_hours * SECS_PER_HOUR
            / slot_duration.as_secs_f64())
        .floor() as u64;

        self.deposit_slot
            .saturating_add(delay_slots)
            .saturating_add(self.total_hops.saturating_mul(mixing.slots_per_hop))
    }

    /// Returns a copy of the deposit with the derived fields filled in for `current_slot`.
    pub fn project(
        &self,
        current_slot: u64,
        slot_duration: Duration,
        mixing: &MixingParams,
    ) -> BridgeDeposit {
        let progress = self.progress_at(current_slot, slot_duration, mixing);

        let mut projection = self.clone();
        projection.apply(progress);
        projection
    }

    /// Records the withdrawal and moves the deposit into its terminal state.
    ///
    /// `progress` is the projection that allowed the withdrawal; its hop count and anonymity set
    /// are frozen into the record.
    pub(crate) fn complete(
        &mut self,
        withdrawal_address: String,
        withdrawal_slot: u64,
        progress: MixingProgress,
    ) {
        self.apply(progress);
        self.status = DepositStatus::Completed;
        self.withdrawal_address = Some(withdrawal_address);
        self.withdrawal_slot = Some(withdrawal_slot);
    }

    fn apply(&mut self, progress: MixingProgress) {
        self.status = progress.status;
        self.mixing_hops_completed = progress.hops_completed;
        self.anonymity_set_size = progress.anonymity_set_size;
    }
}

#[cfg(test)]
mod tests {
    use shadow_params::privacy::PrivacyTiers;

    use super::*;
    use crate::testing::{deposit_at, SLOT_DURATION};

    fn five_hop_config() -> PrivacyConfig {
        PrivacyConfig {
            hop_count: 5,
            decoy_multiplier: 5,
            delay_hours: 1.0,
            split_count: 1,
        }
    }

    #[test]
    fn test_new_deposit_defaults() {
        let mixing = MixingParams::default();
        let tiers = PrivacyTiers::default();
        let deposit = deposit_at(0, PrivacyLevel::Standard, *tiers.get(PrivacyLevel::Standard));

        assert_eq!(deposit.status(), DepositStatus::Deposited);
        assert_eq!(deposit.mixing_hops_completed(), 0);
        assert_eq!(deposit.total_hops(), 10);
        assert_eq!(deposit.anonymity_set_size(), mixing.base_anonymity_set);
        assert_eq!(deposit.privacy_score(), 40);
        assert!(deposit.withdrawal_address().is_none());
        assert!(deposit.withdrawal_slot().is_none());
    }

    #[test]
    fn test_mixing_progress() {
        let mixing = MixingParams::default();
        let deposit = deposit_at(0, PrivacyLevel::Standard, five_hop_config());

        let at = |slot| deposit.progress_at(slot, SLOT_DURATION, &mixing);

        // no time has passed
        assert_eq!(
            at(0).status,
            DepositStatus::Mixing {
                current_hop: 1,
                total_hops: 5
            }
        );
        assert_eq!(at(0).anonymity_set_size, 100);

        // 30s is half a minute, i.e. one hop
        let progress = at(75);
        assert_eq!(
            progress.status,
            DepositStatus::Mixing {
                current_hop: 2,
                total_hops: 5
            }
        );
        assert_eq!(progress.hops_completed, 1);
        assert_eq!(progress.anonymity_set_size, 150);

        // a full minute completes two hops
        let progress = at(150);
        assert_eq!(
            progress.status,
            DepositStatus::Mixing {
                current_hop: 3,
                total_hops: 5
            }
        );
        assert_eq!(progress.hops_completed, 2);
        assert_eq!(progress.anonymity_set_size, 200);

        // one slot short of the fifth hop
        assert_eq!(
            at(374).status,
            DepositStatus::Mixing {
                current_hop: 5,
                total_hops: 5
            }
        );
    }

    #[test]
    fn test_delay_phase() {
        let mixing = MixingParams::default();
        let deposit = deposit_at(0, PrivacyLevel::Standard, five_hop_config());

        assert_eq!(deposit.ready_at_slot(SLOT_DURATION, &mixing), 9_150);

        for slot in [375, 1_000, 9_149] {
            let progress = deposit.progress_at(slot, SLOT_DURATION, &mixing);
            assert_eq!(
                progress.status,
                DepositStatus::WaitingDelay {
                    ready_at_slot: 9_150
                },
                "slot {slot}"
            );
            assert_eq!(progress.hops_completed, 5);
            assert_eq!(progress.anonymity_set_size, 350);
        }

        for slot in [9_150, 9_151, 1_000_000] {
            assert_eq!(
                deposit.progress_at(slot, SLOT_DURATION, &mixing).status,
                DepositStatus::ReadyToWithdraw,
                "slot {slot}"
            );
        }
    }

    #[test]
    fn test_ready_slot_is_relative_to_deposit_slot() {
        let mixing = MixingParams::default();
        let deposit = deposit_at(1_000, PrivacyLevel::Standard, five_hop_config());

        assert_eq!(deposit.ready_at_slot(SLOT_DURATION, &mixing), 10_150);

        // slots before the deposit slot count as no time elapsed
        assert_eq!(
            deposit.progress_at(10, SLOT_DURATION, &mixing).status,
            DepositStatus::Mixing {
                current_hop: 1,
                total_hops: 5
            }
        );
    }

    #[test]
    fn test_fast_tier_delay() {
        let mixing = MixingParams::default();
        let tiers = PrivacyTiers::default();
        let deposit = deposit_at(0, PrivacyLevel::Fast, *tiers.get(PrivacyLevel::Fast));

        // 0.017h is 61.2s, i.e. 153 slots, plus 5 hops * 30 slots
        assert_eq!(deposit.ready_at_slot(SLOT_DURATION, &mixing), 303);

        // the delay is over before the last hop completes, so there is no waiting phase
        assert_eq!(
            deposit.progress_at(374, SLOT_DURATION, &mixing).status,
            DepositStatus::Mixing {
                current_hop: 5,
                total_hops: 5
            }
        );
        assert_eq!(
            deposit.progress_at(375, SLOT_DURATION, &mixing).status,
            DepositStatus::ReadyToWithdraw
        );
    }

    #[test]
    fn test_ready_before_mixing_ends_still_mixes() {
        let mixing = MixingParams::default();
        let mut config = five_hop_config();
        config.delay_hours = 0.0;
        let deposit = deposit_at(0, PrivacyLevel::Fast, config);

        // ready_at_slot is 150, but hops are not done until slot 375
        assert_eq!(deposit.ready_at_slot(SLOT_DURATION, &mixing), 150);
        assert!(matches!(
            deposit.progress_at(200, SLOT_DURATION, &mixing).status,
            DepositStatus::Mixing { .. }
        ));
        assert_eq!(
            deposit.progress_at(375, SLOT_DURATION, &mixing).status,
            DepositStatus::ReadyToWithdraw
        );
    }

    #[test]
    fn test_completed_deposit_is_frozen() {
        let mixing = MixingParams::default();
        let mut deposit = deposit_at(0, PrivacyLevel::Standard, five_hop_config());

        let progress = deposit.progress_at(9_150, SLOT_DURATION, &mixing);
        deposit.complete("shadow1receiver".to_string(), 9_150, progress);

        let later = deposit.project(50_000, SLOT_DURATION, &mixing);
        assert_eq!(later, deposit);
        assert_eq!(later.status(), DepositStatus::Completed);
        assert_eq!(later.mixing_hops_completed(), 5);
        assert_eq!(later.anonymity_set_size(), 350);
        assert_eq!(later.withdrawal_address(), Some("shadow1receiver"));
        assert_eq!(later.withdrawal_slot(), Some(9_150));
    }

    #[test]
    fn test_projection_does_not_touch_the_record() {
        let mixing = MixingParams::default();
        let deposit = deposit_at(0, PrivacyLevel::Standard, five_hop_config());

        let projection = deposit.project(150, SLOT_DURATION, &mixing);
        assert_eq!(projection.mixing_hops_completed(), 2);
        assert_eq!(deposit.mixing_hops_completed(), 0);
        assert_eq!(deposit.status(), DepositStatus::Deposited);
    }

    #[test]
    fn test_involves() {
        let mixing = MixingParams::default();
        let mut deposit = deposit_at(0, PrivacyLevel::Standard, five_hop_config());

        assert!(deposit.involves(deposit.depositor()));
        assert!(!deposit.involves("shadow1receiver"));

        let progress = deposit.progress_at(9_150, SLOT_DURATION, &mixing);
        deposit.complete("shadow1receiver".to_string(), 9_150, progress);
        assert!(deposit.involves("shadow1receiver"));
    }
}
