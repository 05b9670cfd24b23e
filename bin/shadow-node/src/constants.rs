pub(crate) const DEFAULT_RPC_ADDR: &str = "127.0.0.1:8899";

pub(crate) const DEFAULT_THREAD_COUNT: u8 = 4;

pub(crate) const DEFAULT_THREAD_STACK_SIZE: usize = 8 * 1024 * 1024;

pub(crate) const CHAIN_NAME: &str = "ShadowChain";

pub(crate) const NETWORK_NAME: &str = "mainnet-beta";

pub(crate) const NODE_FEATURES: &[&str] = &["Slot Clock", "Privacy Bridge"];
