//! Provides the RPC interface of the ShadowChain node.
//!
//! The RPCs are grouped into node control, chain clock and privacy bridge APIs, all under the
//! `shadow` namespace.

pub mod traits;
pub mod types;
