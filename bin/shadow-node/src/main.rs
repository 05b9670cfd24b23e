//! The ShadowChain node: a slot clock and a privacy bridge served over JSON-RPC.

use std::{fs, path::Path, sync::Arc};

use anyhow::Context;
use clap::Parser;
use config::Config;
use constants::{DEFAULT_THREAD_COUNT, DEFAULT_THREAD_STACK_SIZE};
use rpc_server::{start_rpc, ShadowRpc};
use serde::de::DeserializeOwned;
use shadow_bridge_sm::{config::BridgeCfg, registry::BridgeRegistry};
use shadow_common::{logging, logging::LoggerConfig};
use shadow_params::Params;
use shadow_slot_clock::SlotClock;
use tokio::runtime;
use tracing::{debug, info, trace};

mod args;
mod config;
mod rpc_server;

mod constants;

fn main() -> anyhow::Result<()> {
    let cli = args::Cli::parse();

    let config = match &cli.config {
        Some(path) => parse_toml::<Config>(path)?,
        None => Config::default(),
    };

    let runtime = runtime::Builder::new_multi_thread()
        .worker_threads(config.num_threads.unwrap_or(DEFAULT_THREAD_COUNT).into())
        .thread_stack_size(
            config
                .thread_stack_size
                .unwrap_or(DEFAULT_THREAD_STACK_SIZE),
        )
        .enable_all()
        .build()
        .context("create runtime")?;

    // The OTLP exporter spawns onto the runtime it is built in.
    let _guard = runtime.enter();
    logging::init(LoggerConfig::with_base_name("shadow-node")).context("initialize logging")?;
    info!(config = ?cli.config, params = ?cli.params, "starting shadow node");

    let params = match &cli.params {
        Some(path) => parse_toml::<Params>(path)?,
        None => Params::default(),
    };
    params.validate().context("invalid params")?;

    runtime.block_on(run(params, config))?;

    info!("shadow node shutdown complete");

    Ok(())
}

/// Starts the clock and the bridge, then serves RPC requests until shutdown.
async fn run(params: Params, config: Config) -> anyhow::Result<()> {
    let clock = SlotClock::new(params.slot);
    let registry = Arc::new(BridgeRegistry::new(
        BridgeCfg::from_params(&params),
        clock.clone(),
    ));
    debug!(slot_params = ?params.slot, "slot clock started");

    let rpc_impl = ShadowRpc::new(clock, registry);

    start_rpc(&rpc_impl, &config.rpc_addr).await
}

/// Reads and parses a TOML file from the given path into the given type `T`.
///
/// # Errors
///
/// 1. If the file is not readable.
/// 2. If the contents of the file cannot be deserialized into the given type `T`.
fn parse_toml<T>(path: impl AsRef<Path>) -> anyhow::Result<T>
where
    T: std::fmt::Debug + DeserializeOwned,
{
    let path = path.as_ref();

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read TOML file {}", path.display()))?;
    trace!(?contents, "read file");

    let parsed = toml::from_str::<T>(&contents)
        .with_context(|| format!("failed to parse TOML file {}", path.display()))?;
    debug!(?parsed, "parsed TOML file");

    Ok(parsed)
}
