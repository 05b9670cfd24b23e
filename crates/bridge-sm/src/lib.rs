//! This crate implements the privacy bridge of the ShadowChain node.
//!
//! Every deposit moves through mixing, a privacy delay and finally withdrawal. None of these
//! phases is driven by a timer: the status of a deposit is a pure function of the current slot
//! and the configuration captured when the deposit was made, and is derived afresh whenever the
//! deposit is read. The only stored transition is the final one into
//! [`DepositStatus::Completed`](deposit::state::DepositStatus::Completed), made by a withdrawal.

pub mod config;
pub mod deposit;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;
