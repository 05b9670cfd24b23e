//! Identifiers of bridge deposits.

use std::{borrow::Borrow, fmt::Display};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shadow_params::privacy::PrivacyLevel;

/// Prefix of every bridge id.
pub const BRIDGE_ID_PREFIX: &str = "bridge_";

/// Number of digest bytes kept in a bridge id.
const BRIDGE_ID_BYTES: usize = 8;

/// The unique identifier of a bridge deposit, e.g. `bridge_1f0c9a7e3b2d4c55`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BridgeId(String);

impl BridgeId {
    /// Derives an id from the deposit request, the time it was received and a nonce.
    ///
    /// The nonce lets the caller rehash on the off chance that the id is already taken.
    pub fn derive(
        depositor: &str,
        amount: u64,
        level: PrivacyLevel,
        received_at_nanos: i64,
        nonce: u64,
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(depositor.as_bytes());
        hasher.update(amount.to_le_bytes());
        hasher.update(level.as_str().as_bytes());
        hasher.update(received_at_nanos.to_le_bytes());
        hasher.update(nonce.to_le_bytes());
        let digest = hasher.finalize();

        Self(format!(
            "{BRIDGE_ID_PREFIX}{}",
            hex::encode(&digest[..BRIDGE_ID_BYTES])
        ))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for BridgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for BridgeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<BridgeId> for String {
    fn from(id: BridgeId) -> Self {
        id.0
    }
}
