//! Proptest strategies for the bridge.

use proptest::prelude::*;
use shadow_params::privacy::PrivacyLevel;

/// Any of the named privacy tiers.
pub(crate) fn arb_privacy_level() -> impl Strategy<Value = PrivacyLevel> {
    prop_oneof![
        Just(PrivacyLevel::Fast),
        Just(PrivacyLevel::Standard),
        Just(PrivacyLevel::Maximum),
    ]
}

/// A privacy level name as a client might send it, including unknown ones.
pub(crate) fn arb_privacy_level_name() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        arb_privacy_level().prop_map(|level| Some(level.to_string())),
        "[a-z]{0,10}".prop_map(Some),
    ]
}

/// A non-zero amount small enough that a handful of them cannot overflow the volume.
pub(crate) fn arb_amount() -> impl Strategy<Value = u64> {
    1u64..=1_000_000_000_000_000
}

/// A slot somewhere within the first few days of the chain, enough to cover every tier's delay.
pub(crate) fn arb_slot() -> impl Strategy<Value = u64> {
    0u64..1_000_000
}
