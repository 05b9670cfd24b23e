//! This crate contains the parameters that dictate the behavior of the ShadowChain node: how time
//! is divided into slots and epochs, how fast bridge deposits are mixed and what each privacy tier
//! entails.

mod default;
pub mod errors;
pub mod mixing;
pub mod privacy;
pub mod slot;

use serde::{Deserialize, Serialize};

pub use crate::default::BPS_DENOMINATOR;
use crate::{errors::ParamsError, mixing::MixingParams, privacy::PrivacyTiers, slot::SlotParams};

/// All the parameters of the node.
///
/// Every section falls back to its defaults when omitted from the params file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Slot and epoch timing.
    #[serde(default)]
    pub slot: SlotParams,

    /// Mixing schedule and withdrawal fee of the privacy bridge.
    #[serde(default)]
    pub mixing: MixingParams,

    /// The privacy tiers offered by the bridge.
    #[serde(default)]
    pub privacy: PrivacyTiers,
}

impl Params {
    /// Checks the invariants that the slot clock and the deposit registry rely on.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.slot.slot_duration_ms == 0 {
            return Err(ParamsError::Zero("slot_duration_ms"));
        }

        if self.slot.epoch_length == 0 {
            return Err(ParamsError::Zero("epoch_length"));
        }

        if self.mixing.hop_rate_per_minute == 0 {
            return Err(ParamsError::Zero("hop_rate_per_minute"));
        }

        if self.mixing.denomination == 0 {
            return Err(ParamsError::Zero("denomination"));
        }

        if self.mixing.withdrawal_fee_bps > BPS_DENOMINATOR {
            return Err(ParamsError::FeeTooHigh(self.mixing.withdrawal_fee_bps));
        }

        self.privacy.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        assert!(Params::default().validate().is_ok());
    }

    #[test]
    fn test_partial_params_use_defaults() {
        let params_toml = r#"
            [slot]
            slot_duration_ms = 1000
            epoch_length = 32
        "#;

        let params = toml::from_str::<Params>(params_toml).unwrap();
        assert_eq!(params.slot.slot_duration_ms, 1000);
        assert_eq!(params.slot.epoch_length, 32);
        assert_eq!(params.mixing, MixingParams::default());
        assert_eq!(params.privacy, PrivacyTiers::default());
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        let mut params = Params::default();
        params.slot.slot_duration_ms = 0;
        assert_eq!(params.validate(), Err(ParamsError::Zero("slot_duration_ms")));

        let mut params = Params::default();
        params.mixing.withdrawal_fee_bps = 10_001;
        assert_eq!(params.validate(), Err(ParamsError::FeeTooHigh(10_001)));

        let mut params = Params::default();
        params.mixing.hop_rate_per_minute = 0;
        assert_eq!(
            params.validate(),
            Err(ParamsError::Zero("hop_rate_per_minute"))
        );
    }

    #[test]
    fn test_params_serde() {
        let params = Params::default();
        let serialized = toml::to_string(&params).unwrap();
        let deserialized: Params = toml::from_str(&serialized).unwrap();

        assert_eq!(params, deserialized);
    }
}
