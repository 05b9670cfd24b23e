//! Traits for the RPC server.

use jsonrpsee::{core::RpcResult, proc_macros::rpc};

use crate::types::{
    RpcBridgeStats, RpcDepositInfo, RpcDepositReceipt, RpcHealth, RpcSlotInfo,
    RpcWithdrawalReceipt,
};

/// RPCs related to information about the node itself.
#[cfg_attr(not(feature = "client"), rpc(server, namespace = "shadow"))]
#[cfg_attr(feature = "client", rpc(server, client, namespace = "shadow"))]
pub trait ShadowControlApi {
    /// Get the uptime for the node in seconds assuming the clock is strictly monotonically
    /// increasing.
    #[method(name = "uptime")]
    async fn get_uptime(&self) -> RpcResult<u64>;

    /// Get the health of the node along with what it is.
    #[method(name = "health")]
    async fn get_health(&self) -> RpcResult<RpcHealth>;
}

/// RPCs that expose the slot clock of the chain.
#[cfg_attr(not(feature = "client"), rpc(server, namespace = "shadow"))]
#[cfg_attr(feature = "client", rpc(server, client, namespace = "shadow"))]
pub trait ShadowChainApi {
    /// Get the current slot and its epoch coordinates.
    #[method(name = "slotInfo")]
    async fn get_slot_info(&self) -> RpcResult<RpcSlotInfo>;
}

/// RPCs that drive and monitor the privacy bridge.
#[cfg_attr(not(feature = "client"), rpc(server, namespace = "shadow"))]
#[cfg_attr(feature = "client", rpc(server, client, namespace = "shadow"))]
pub trait ShadowBridgeApi {
    /// Deposit `amount` base units from `depositor` into the bridge.
    ///
    /// `privacy_level` is one of `fast`, `standard` or `maximum`; anything else, including
    /// leaving it out, means `standard`.
    #[method(name = "bridgeDeposit")]
    async fn create_deposit(
        &self,
        depositor: String,
        amount: u64,
        privacy_level: Option<String>,
    ) -> RpcResult<RpcDepositReceipt>;

    /// Get a deposit with its status as of now.
    #[method(name = "bridgeStatus")]
    async fn get_deposit_status(&self, bridge_id: String) -> RpcResult<RpcDepositInfo>;

    /// Withdraw a deposit that is ready to be withdrawn.
    #[method(name = "bridgeWithdraw")]
    async fn withdraw(
        &self,
        bridge_id: String,
        withdrawal_address: String,
    ) -> RpcResult<RpcWithdrawalReceipt>;

    /// Get all deposits made by or withdrawn to `address`.
    #[method(name = "bridgeHistory")]
    async fn get_deposits_for(&self, address: String) -> RpcResult<Vec<RpcDepositInfo>>;

    /// Get all deposits.
    #[method(name = "bridgeDeposits")]
    async fn get_deposits(&self) -> RpcResult<Vec<RpcDepositInfo>>;

    /// Get aggregate statistics over all deposits.
    #[method(name = "bridgeStats")]
    async fn get_bridge_stats(&self) -> RpcResult<RpcBridgeStats>;
}
