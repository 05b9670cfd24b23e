//! Bridge-wide configuration shared across all deposits.

use shadow_params::{mixing::MixingParams, privacy::PrivacyTiers, Params};

/// Bridge-wide configuration shared across all deposits.
///
/// These values are static over the lifetime of the node and apply uniformly to every deposit in
/// the registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BridgeCfg {
    /// The mixing schedule and withdrawal fee.
    pub mixing: MixingParams,

    /// The privacy tiers a depositor can pick from.
    pub privacy: PrivacyTiers,
}

impl BridgeCfg {
    /// Extracts the bridge configuration from the node parameters.
    pub fn from_params(params: &Params) -> Self {
        Self {
            mixing: params.mixing.clone(),
            privacy: params.privacy.clone(),
        }
    }

    /// Returns the mixing parameters.
    pub const fn mixing(&self) -> &MixingParams {
        &self.mixing
    }

    /// Returns the privacy tiers.
    pub const fn privacy(&self) -> &PrivacyTiers {
        &self.privacy
    }
}
