//! Errors returned by the deposit registry.

use thiserror::Error;

use crate::deposit::state::DepositStatus;

/// Errors that can occur in the deposit registry.
///
/// None of these are fatal and none of them leave a trace in the registry: an operation that
/// fails has not mutated anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No deposit is registered under the given id.
    #[error("bridge deposit {0} not found")]
    NotFound(String),

    /// A withdrawal was attempted before the deposit became withdrawable.
    #[error("bridge deposit {bridge_id} not ready for withdrawal; status: {status}")]
    NotReady {
        /// The id of the deposit.
        bridge_id: String,
        /// The status the deposit is in.
        status: DepositStatus,
    },

    /// A deposit request was malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// The result type for operations on the deposit registry.
pub type RegistryResult<T> = Result<T, RegistryError>;
