//! Errors for the node parameters.

use thiserror::Error;

/// Error while parsing or validating node parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    /// A parameter that must be non-zero was set to zero.
    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    /// The withdrawal fee exceeds the full amount.
    #[error("withdrawal fee must be at most 10000 bps, got {0}")]
    FeeTooHigh(u64),

    /// A privacy tier has an invalid delay.
    #[error("privacy tier {tier} has invalid delay_hours {delay_hours}")]
    InvalidDelay {
        /// Name of the offending tier.
        tier: String,
        /// The configured delay.
        delay_hours: f64,
    },

    /// The privacy level name is not one of the known tiers.
    #[error("unknown privacy level: {0}")]
    UnknownPrivacyLevel(String),
}
