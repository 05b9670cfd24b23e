//! Ready-made deposits and registries.

use std::{sync::Arc, time::Duration};

use shadow_params::{
    mixing::MixingParams,
    privacy::{PrivacyConfig, PrivacyLevel},
};
use shadow_slot_clock::ManualSlots;

use crate::{
    config::BridgeCfg,
    deposit::{id::BridgeId, machine::BridgeDeposit},
    registry::BridgeRegistry,
};

/// Slot duration used throughout the tests.
pub(crate) const SLOT_DURATION: Duration = Duration::from_millis(400);

/// Address that makes the deposits in tests.
pub(crate) const DEPOSITOR: &str = "shadow1depositor";

/// Address that receives the withdrawals in tests.
pub(crate) const RECEIVER: &str = "shadow1receiver";

/// Creates a deposit made by [`DEPOSITOR`] at `deposit_slot`.
pub(crate) fn deposit_at(
    deposit_slot: u64,
    level: PrivacyLevel,
    config: PrivacyConfig,
) -> BridgeDeposit {
    BridgeDeposit::new(
        BridgeId::derive(DEPOSITOR, 1_000, level, deposit_slot as i64, 0),
        DEPOSITOR.to_string(),
        1_000,
        deposit_slot,
        0,
        level,
        config,
        &MixingParams::default(),
    )
}

/// Creates an empty registry with default parameters, along with the handle that moves its time.
pub(crate) fn registry() -> (Arc<ManualSlots>, BridgeRegistry<Arc<ManualSlots>>) {
    let slots = Arc::new(ManualSlots::new());
    let registry = BridgeRegistry::new(BridgeCfg::default(), slots.clone());

    (slots, registry)
}
