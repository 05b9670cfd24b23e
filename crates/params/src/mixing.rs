//! Parameters of the privacy bridge mixing schedule and withdrawal fee.

use serde::{Deserialize, Serialize};

use crate::default::{
    ANONYMITY_PER_HOP, BASE_ANONYMITY_SET, BPS_DENOMINATOR, DENOMINATION, HOP_RATE_PER_MINUTE,
    SLOTS_PER_HOP, TOKEN_SYMBOL, WITHDRAWAL_FEE_BPS,
};

/// Bridge-wide mixing parameters that apply uniformly to every deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixingParams {
    /// Number of hops completed per minute of elapsed time.
    pub hop_rate_per_minute: u64,

    /// Number of slots charged per hop in addition to the privacy delay.
    pub slots_per_hop: u64,

    /// Anonymity set size of a deposit before any hop has completed.
    pub base_anonymity_set: u64,

    /// Anonymity set growth per completed hop.
    pub anonymity_per_hop: u64,

    /// Fee withheld on withdrawal, in basis points.
    pub withdrawal_fee_bps: u64,

    /// Number of base units in one whole token.
    pub denomination: u64,

    /// Ticker used in human-readable amounts.
    pub token_symbol: String,
}

impl MixingParams {
    /// Returns the anonymity set size after `hops` completed hops.
    pub const fn anonymity_set_after(&self, hops: u64) -> u64 {
        self.base_anonymity_set
            .saturating_add(hops.saturating_mul(self.anonymity_per_hop))
    }

    /// Returns the fee withheld from a withdrawal of `amount` base units, rounded down.
    pub const fn withdrawal_fee(&self, amount: u64) -> u64 {
        (amount as u128 * self.withdrawal_fee_bps as u128 / BPS_DENOMINATOR as u128) as u64
    }

    /// Formats an amount of base units as whole tokens with two decimals, e.g. `"1.50 SHOL"`.
    pub fn format_amount(&self, amount: u64) -> String {
        let whole = amount as f64 / self.denomination.max(1) as f64;
        format!("{whole:.2} {}", self.token_symbol)
    }
}

impl Default for MixingParams {
    fn default() -> Self {
        Self {
            hop_rate_per_minute: HOP_RATE_PER_MINUTE,
            slots_per_hop: SLOTS_PER_HOP,
            base_anonymity_set: BASE_ANONYMITY_SET,
            anonymity_per_hop: ANONYMITY_PER_HOP,
            withdrawal_fee_bps: WITHDRAWAL_FEE_BPS,
            denomination: DENOMINATION,
            token_symbol: TOKEN_SYMBOL.to_string(),
        }
    }
}
