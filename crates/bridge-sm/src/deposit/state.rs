//! The states of a bridge deposit.
//!
//! A deposit starts out [`Deposited`](DepositStatus::Deposited), goes through
//! [`Mixing`](DepositStatus::Mixing) one hop at a time, then sits in
//! [`WaitingDelay`](DepositStatus::WaitingDelay) until its privacy delay has passed, after which it
//! is [`ReadyToWithdraw`](DepositStatus::ReadyToWithdraw). A successful withdrawal moves it to
//! [`Completed`](DepositStatus::Completed), which is terminal.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The status of a bridge deposit.
///
/// Serialized in the externally tagged form, i.e. unit variants as bare strings
/// (`"ReadyToWithdraw"`) and the others as single-key objects
/// (`{"Mixing": {"current_hop": 3, "total_hops": 5}}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepositStatus {
    /// The deposit has been accepted but not observed since.
    Deposited,

    /// The deposit is being mixed.
    Mixing {
        /// The hop currently in progress (1-based).
        current_hop: u64,
        /// The total number of hops for this deposit.
        total_hops: u64,
    },

    /// Mixing is done; the deposit waits out its privacy delay.
    WaitingDelay {
        /// The first slot at which the deposit can be withdrawn.
        ready_at_slot: u64,
    },

    /// The deposit can be withdrawn.
    ReadyToWithdraw,

    /// The deposit has been withdrawn.
    Completed,
}

impl DepositStatus {
    /// Whether the status is terminal, i.e. can never change again.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, DepositStatus::Completed)
    }

    /// Whether a withdrawal would be accepted in this status.
    pub const fn is_withdrawable(&self) -> bool {
        matches!(self, DepositStatus::ReadyToWithdraw)
    }
}

impl Display for DepositStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepositStatus::Deposited => write!(f, "Deposited"),
            DepositStatus::Mixing {
                current_hop,
                total_hops,
            } => write!(f, "Mixing({current_hop}/{total_hops})"),
            DepositStatus::WaitingDelay { ready_at_slot } => {
                write!(f, "WaitingDelay(ready at slot {ready_at_slot})")
            }
            DepositStatus::ReadyToWithdraw => write!(f, "ReadyToWithdraw"),
            DepositStatus::Completed => write!(f, "Completed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_status_wire_shape() {
        assert_eq!(
            serde_json::to_value(DepositStatus::ReadyToWithdraw).unwrap(),
            json!("ReadyToWithdraw")
        );
        assert_eq!(
            serde_json::to_value(DepositStatus::Mixing {
                current_hop: 3,
                total_hops: 5
            })
            .unwrap(),
            json!({ "Mixing": { "current_hop": 3, "total_hops": 5 } })
        );
        assert_eq!(
            serde_json::to_value(DepositStatus::WaitingDelay {
                ready_at_slot: 9150
            })
            .unwrap(),
            json!({ "WaitingDelay": { "ready_at_slot": 9150 } })
        );
    }

    #[test]
    fn test_only_completed_is_terminal() {
        assert!(DepositStatus::Completed.is_terminal());
        assert!(!DepositStatus::ReadyToWithdraw.is_terminal());
        assert!(!DepositStatus::Deposited.is_terminal());
        assert!(DepositStatus::ReadyToWithdraw.is_withdrawable());
        assert!(!DepositStatus::WaitingDelay { ready_at_slot: 1 }.is_withdrawable());
    }
}
