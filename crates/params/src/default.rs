//! Default values for the node parameters.

/// Default wall-clock duration of a single slot in milliseconds.
pub(crate) const SLOT_DURATION_MS: u64 = 400;

/// Default number of slots in an epoch.
pub(crate) const EPOCH_LENGTH: u64 = 432_000;

/// Default number of mixing hops completed per minute of elapsed time.
pub(crate) const HOP_RATE_PER_MINUTE: u64 = 2;

/// Default number of slots charged per hop on top of the privacy delay.
pub(crate) const SLOTS_PER_HOP: u64 = 30;

/// Default anonymity set size of a freshly created deposit.
pub(crate) const BASE_ANONYMITY_SET: u64 = 100;

/// Default growth of the anonymity set per completed hop.
pub(crate) const ANONYMITY_PER_HOP: u64 = 50;

/// Default withdrawal fee in basis points (0.05%).
pub(crate) const WITHDRAWAL_FEE_BPS: u64 = 5;

/// Number of base units in one whole token.
pub(crate) const DENOMINATION: u64 = 1_000_000_000;

/// Ticker of the native token.
pub(crate) const TOKEN_SYMBOL: &str = "SHOL";

/// Basis points in one whole.
pub const BPS_DENOMINATOR: u64 = 10_000;
