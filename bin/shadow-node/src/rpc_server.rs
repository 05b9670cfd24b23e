//! Bootstraps an RPC server for the node.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use jsonrpsee::{
    core::RpcResult,
    types::{ErrorCode, ErrorObjectOwned},
    RpcModule,
};
use serde::Serialize;
use shadow_bridge_sm::{
    deposit::{machine::BridgeDeposit, state::DepositStatus},
    registry::{errors::RegistryError, stats::RegistryStats, BridgeRegistry},
};
use shadow_params::privacy::PrivacyConfig;
use shadow_rpc::{
    traits::{ShadowBridgeApiServer, ShadowChainApiServer, ShadowControlApiServer},
    types::{
        RpcBridgeStats, RpcDepositInfo, RpcDepositReceipt, RpcDepositStatus, RpcHealth,
        RpcNodeStatus, RpcPrivacyConfig, RpcSlotInfo, RpcWithdrawalReceipt,
    },
};
use shadow_slot_clock::{SlotClock, SlotSource};
use tracing::{debug, info, warn};

use crate::constants::{CHAIN_NAME, NETWORK_NAME, NODE_FEATURES};

/// Builds the module with every RPC namespace the node serves.
pub(crate) fn rpc_module<T>(rpc_impl: &T) -> anyhow::Result<RpcModule<T>>
where
    T: ShadowControlApiServer + ShadowChainApiServer + ShadowBridgeApiServer + Clone + Sync + Send,
{
    let mut rpc_module = RpcModule::new(rpc_impl.clone());

    let control_api = ShadowControlApiServer::into_rpc(rpc_impl.clone());
    let chain_api = ShadowChainApiServer::into_rpc(rpc_impl.clone());
    let bridge_api = ShadowBridgeApiServer::into_rpc(rpc_impl.clone());

    rpc_module.merge(control_api).context("merge control api")?;
    rpc_module.merge(chain_api).context("merge chain api")?;
    rpc_module.merge(bridge_api).context("merge bridge api")?;

    Ok(rpc_module)
}

/// Starts an RPC server and serves requests until the process is interrupted.
pub(crate) async fn start_rpc<T>(rpc_impl: &T, rpc_addr: &str) -> anyhow::Result<()>
where
    T: ShadowControlApiServer + ShadowChainApiServer + ShadowBridgeApiServer + Clone + Sync + Send,
{
    let rpc_module = rpc_module(rpc_impl)?;

    info!("starting shadow rpc server at {rpc_addr}");
    let rpc_server = jsonrpsee::server::ServerBuilder::new()
        .build(rpc_addr)
        .await
        .with_context(|| format!("build shadow rpc server at {rpc_addr}"))?;

    let rpc_handle = rpc_server.start(rpc_module);
    debug!("shadow rpc server started");

    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            res.context("listen for shutdown signal")?;
            info!("received shutdown signal");
        }
        _ = rpc_handle.clone().stopped() => {
            warn!("rpc server stopped on its own");
        }
    }

    info!("stopping rpc server");
    if rpc_handle.stop().is_err() {
        warn!("rpc server already stopped");
    }

    Ok(())
}

/// RPC server for the node.
///
/// Holds the slot clock for epoch arithmetic and a shared handle to the bridge registry.
#[derive(Debug, Clone)]
pub(crate) struct ShadowRpc<S> {
    /// The clock started with the node.
    clock: SlotClock,

    /// The bridge deposit registry.
    registry: Arc<BridgeRegistry<S>>,
}

impl<S: SlotSource> ShadowRpc<S> {
    /// Creates a new instance of [`ShadowRpc`].
    pub(crate) const fn new(clock: SlotClock, registry: Arc<BridgeRegistry<S>>) -> Self {
        Self { clock, registry }
    }
}

#[async_trait]
impl<S: SlotSource + 'static> ShadowControlApiServer for ShadowRpc<S> {
    async fn get_uptime(&self) -> RpcResult<u64> {
        Ok(self.clock.uptime().as_secs())
    }

    async fn get_health(&self) -> RpcResult<RpcHealth> {
        Ok(RpcHealth {
            status: RpcNodeStatus::Healthy,
            chain: CHAIN_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            network: NETWORK_NAME.to_string(),
            token: self.registry.cfg().mixing().token_symbol.clone(),
            features: NODE_FEATURES.iter().map(|f| f.to_string()).collect(),
        })
    }
}

#[async_trait]
impl<S: SlotSource + 'static> ShadowChainApiServer for ShadowRpc<S> {
    async fn get_slot_info(&self) -> RpcResult<RpcSlotInfo> {
        let slot = self.registry.slots().current_slot();
        let position = self.clock.position_of(slot);
        let params = self.clock.params();

        Ok(RpcSlotInfo {
            slot: position.slot,
            epoch: position.epoch,
            slot_in_epoch: position.slot_in_epoch,
            slot_duration_ms: params.slot_duration_ms,
            epoch_length: params.epoch_length,
        })
    }
}

#[async_trait]
impl<S: SlotSource + 'static> ShadowBridgeApiServer for ShadowRpc<S> {
    async fn create_deposit(
        &self,
        depositor: String,
        amount: u64,
        privacy_level: Option<String>,
    ) -> RpcResult<RpcDepositReceipt> {
        let bridge_id = self
            .registry
            .create(&depositor, amount, privacy_level.as_deref())
            .map_err(registry_error)?;

        Ok(RpcDepositReceipt {
            bridge_id: bridge_id.into(),
        })
    }

    async fn get_deposit_status(&self, bridge_id: String) -> RpcResult<RpcDepositInfo> {
        let deposit = self.registry.status(&bridge_id).map_err(registry_error)?;

        Ok(rpc_deposit_info(&deposit))
    }

    async fn withdraw(
        &self,
        bridge_id: String,
        withdrawal_address: String,
    ) -> RpcResult<RpcWithdrawalReceipt> {
        let receipt = self
            .registry
            .withdraw(&bridge_id, &withdrawal_address)
            .map_err(registry_error)?;

        Ok(RpcWithdrawalReceipt {
            bridge_id: receipt.bridge_id.into(),
            withdrawn_amount: self
                .registry
                .cfg()
                .mixing()
                .format_amount(receipt.withdrawn_amount),
            withdrawn_base_units: receipt.withdrawn_amount,
            fee: receipt.fee,
            withdrawal_slot: receipt.withdrawal_slot,
            message: receipt.message,
        })
    }

    async fn get_deposits_for(&self, address: String) -> RpcResult<Vec<RpcDepositInfo>> {
        Ok(self
            .registry
            .list_by_address(&address)
            .iter()
            .map(rpc_deposit_info)
            .collect())
    }

    async fn get_deposits(&self) -> RpcResult<Vec<RpcDepositInfo>> {
        Ok(self
            .registry
            .list_all()
            .iter()
            .map(rpc_deposit_info)
            .collect())
    }

    async fn get_bridge_stats(&self) -> RpcResult<RpcBridgeStats> {
        let RegistryStats {
            total_volume,
            active_deposits,
            anonymity_set,
            average_delay_hours,
        } = self.registry.stats();

        Ok(RpcBridgeStats {
            total_volume,
            active_deposits,
            anonymity_set,
            average_delay_hours,
        })
    }
}

fn rpc_deposit_info(deposit: &BridgeDeposit) -> RpcDepositInfo {
    RpcDepositInfo {
        bridge_id: deposit.bridge_id().to_string(),
        depositor: deposit.depositor().to_string(),
        amount: deposit.amount(),
        deposit_slot: deposit.deposit_slot(),
        deposit_time: deposit.deposit_time(),
        status: rpc_status(deposit.status()),
        privacy_level: deposit.privacy_level().to_string(),
        privacy_config: rpc_privacy_config(deposit.privacy_config()),
        mixing_hops_completed: deposit.mixing_hops_completed(),
        total_hops: deposit.total_hops(),
        withdrawal_address: deposit.withdrawal_address().map(str::to_string),
        withdrawal_slot: deposit.withdrawal_slot(),
        anonymity_set_size: deposit.anonymity_set_size(),
        privacy_score: deposit.privacy_score(),
    }
}

const fn rpc_status(status: DepositStatus) -> RpcDepositStatus {
    match status {
        DepositStatus::Deposited => RpcDepositStatus::Deposited,
        DepositStatus::Mixing {
            current_hop,
            total_hops,
        } => RpcDepositStatus::Mixing {
            current_hop,
            total_hops,
        },
        DepositStatus::WaitingDelay { ready_at_slot } => {
            RpcDepositStatus::WaitingDelay { ready_at_slot }
        }
        DepositStatus::ReadyToWithdraw => RpcDepositStatus::ReadyToWithdraw,
        DepositStatus::Completed => RpcDepositStatus::Completed,
    }
}

fn rpc_privacy_config(config: &PrivacyConfig) -> RpcPrivacyConfig {
    RpcPrivacyConfig {
        hops: config.hop_count,
        decoy_multiplier: config.decoy_multiplier,
        delay_hours: config.delay_hours,
        split_count: config.split_count,
    }
}

/// Maps a registry failure to the error object returned to the caller.
fn registry_error(err: RegistryError) -> ErrorObjectOwned {
    match err {
        RegistryError::NotFound(bridge_id) => {
            rpc_error(ErrorCode::InvalidParams, "Bridge ID not found", bridge_id)
        }
        RegistryError::NotReady { status, .. } => rpc_error(
            ErrorCode::InvalidRequest,
            "Bridge deposit not ready for withdrawal",
            rpc_status(status),
        ),
        RegistryError::InvalidInput(reason) => {
            rpc_error(ErrorCode::InvalidParams, "Invalid bridge request", reason)
        }
    }
}

/// Returns an [`ErrorObjectOwned`] with the given code, message, and data.
/// Useful for creating custom error objects in RPC responses.
fn rpc_error<T: Serialize>(err_code: ErrorCode, message: &str, data: T) -> ErrorObjectOwned {
    ErrorObjectOwned::owned::<_>(err_code.code(), message, Some(data))
}
