//! Types for the RPC server.

use serde::{Deserialize, Serialize};

/// Enum representing the health of the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RpcNodeStatus {
    /// The node is serving requests.
    Healthy,
}

/// Describes the node and the chain it serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcHealth {
    /// Health of the node.
    pub status: RpcNodeStatus,

    /// Name of the chain.
    pub chain: String,

    /// Version of the node software.
    pub version: String,

    /// Name of the network.
    pub network: String,

    /// Ticker of the native token.
    pub token: String,

    /// Features advertised by the node.
    pub features: Vec<String>,
}

/// The current slot with its epoch coordinates and the clock parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcSlotInfo {
    /// The current slot.
    pub slot: u64,

    /// The current epoch.
    pub epoch: u64,

    /// Offset of the current slot within the epoch.
    pub slot_in_epoch: u64,

    /// Duration of a slot in milliseconds.
    pub slot_duration_ms: u64,

    /// Number of slots per epoch.
    pub epoch_length: u64,
}

/// Represents the status of a bridge deposit.
///
/// Unit variants are encoded as bare strings and the others as single-key objects, e.g.
/// `{"Mixing": {"current_hop": 3, "total_hops": 5}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RpcDepositStatus {
    /// Deposit accepted, not yet observed.
    Deposited,

    /// Deposit is being mixed.
    Mixing {
        /// The hop in progress (1-based).
        current_hop: u64,
        /// Total number of hops.
        total_hops: u64,
    },

    /// Mixing is done, the privacy delay has not passed yet.
    WaitingDelay {
        /// First slot at which the deposit can be withdrawn.
        ready_at_slot: u64,
    },

    /// Deposit can be withdrawn.
    ReadyToWithdraw,

    /// Deposit has been withdrawn.
    Completed,
}

/// The mixing configuration of a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RpcPrivacyConfig {
    /// Number of mixing hops.
    pub hops: u64,

    /// Decoys per real output.
    pub decoy_multiplier: u64,

    /// Delay after mixing, in hours.
    pub delay_hours: f64,

    /// Number of outputs the deposit is split into.
    pub split_count: u64,
}

/// Represents bridge deposit details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcDepositInfo {
    /// Id of the deposit.
    pub bridge_id: String,

    /// Address that made the deposit.
    pub depositor: String,

    /// Deposited amount in base units.
    pub amount: u64,

    /// Slot at which the deposit was made.
    pub deposit_slot: u64,

    /// Unix timestamp (seconds) at which the deposit was made.
    pub deposit_time: i64,

    /// Status of the deposit as of the request.
    pub status: RpcDepositStatus,

    /// Name of the privacy tier.
    pub privacy_level: String,

    /// Mixing configuration of the privacy tier.
    pub privacy_config: RpcPrivacyConfig,

    /// Number of hops completed.
    pub mixing_hops_completed: u64,

    /// Total number of hops.
    pub total_hops: u64,

    /// Address the deposit was withdrawn to.
    pub withdrawal_address: Option<String>,

    /// Slot at which the deposit was withdrawn.
    pub withdrawal_slot: Option<u64>,

    /// Anonymity set the deposit is mixed into.
    pub anonymity_set_size: u64,

    /// Privacy score between 0 and 100.
    pub privacy_score: u64,
}

/// Returned when a deposit has been accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcDepositReceipt {
    /// Id under which the deposit can be queried and withdrawn.
    pub bridge_id: String,
}

/// Returned when a deposit has been withdrawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcWithdrawalReceipt {
    /// Id of the withdrawn deposit.
    pub bridge_id: String,

    /// Human-readable amount paid out, e.g. `"9.99 SHOL"`.
    pub withdrawn_amount: String,

    /// Amount paid out in base units.
    pub withdrawn_base_units: u64,

    /// Fee withheld in base units.
    pub fee: u64,

    /// Slot at which the withdrawal happened.
    pub withdrawal_slot: u64,

    /// Summary of the withdrawal.
    pub message: String,
}

/// Aggregate statistics of the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RpcBridgeStats {
    /// Sum of all amounts ever deposited.
    pub total_volume: u64,

    /// Deposits not yet withdrawn.
    pub active_deposits: u32,

    /// Sum of the anonymity sets of all deposits.
    pub anonymity_set: u64,

    /// Mean privacy delay in hours.
    pub average_delay_hours: f64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deposit_status_encoding() {
        assert_eq!(
            serde_json::to_value(RpcDepositStatus::Completed).unwrap(),
            json!("Completed")
        );
        assert_eq!(
            serde_json::to_value(RpcDepositStatus::WaitingDelay {
                ready_at_slot: 9150
            })
            .unwrap(),
            json!({ "WaitingDelay": { "ready_at_slot": 9150 } })
        );

        let decoded: RpcDepositStatus =
            serde_json::from_value(json!({ "Mixing": { "current_hop": 3, "total_hops": 5 } }))
                .unwrap();
        assert_eq!(
            decoded,
            RpcDepositStatus::Mixing {
                current_hop: 3,
                total_hops: 5
            }
        );
    }

    #[test]
    fn test_health_encoding() {
        let health = RpcHealth {
            status: RpcNodeStatus::Healthy,
            chain: "ShadowChain".to_string(),
            version: "0.1.0".to_string(),
            network: "mainnet-beta".to_string(),
            token: "SHOL".to_string(),
            features: vec!["Privacy Bridge".to_string()],
        };

        let value = serde_json::to_value(&health).unwrap();
        assert_eq!(value["status"], json!("healthy"));
        assert_eq!(value["features"], json!(["Privacy Bridge"]));
    }
}
