use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_RPC_ADDR;

/// The configuration values that dictate the behavior of the node.
///
/// Unlike [`Params`](shadow_params::Params), these are local to a single node and can be changed
/// freely between restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Config {
    /// The address the RPC server listens on.
    pub rpc_addr: String,

    /// The number of worker threads of the runtime.
    pub num_threads: Option<u8>,

    /// The stack size of each worker thread in bytes.
    pub thread_stack_size: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_addr: DEFAULT_RPC_ADDR.to_string(),
            num_threads: None,
            thread_stack_size: None,
        }
    }
}
