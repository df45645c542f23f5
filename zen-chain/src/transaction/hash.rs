use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sm3::Sm3;

use super::Transaction;

/// A transaction identifier.
///
/// Transaction identifiers are displayed in the same byte order they are
/// hashed in.
#[derive(Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Hash)]
#[cfg_attr(
    any(test, feature = "proptest-impl"),
    derive(proptest_derive::Arbitrary)
)]
pub struct Hash(pub [u8; 32]);

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("transaction::Hash")
            .field(&hex::encode(self.0))
            .finish()
    }
}

impl std::str::FromStr for Hash {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0; 32];
        hex::decode_to_slice(s, &mut bytes[..])?;

        Ok(Hash(bytes))
    }
}

/// The hash function used to identify transactions.
///
/// Chains that use ECDSA keys identify transactions with SHA-256, and chains
/// that use SM2 keys identify them with SM3.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashEngine {
    /// Single SHA-256.
    #[default]
    Sha256,

    /// The SM3 hash function, GB/T 32905-2016.
    Sm3,
}

impl HashEngine {
    /// Hashes `bytes` with this engine.
    pub fn digest(&self, bytes: &[u8]) -> [u8; 32] {
        match self {
            HashEngine::Sha256 => Sha256::digest(bytes).into(),
            HashEngine::Sm3 => Sm3::digest(bytes).into(),
        }
    }
}

/// Computes transaction identifiers with a fixed [`HashEngine`].
///
/// The engine is chosen when the identifier is constructed, so callers that
/// need different engines can hold different identifiers.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct TransactionIdentifier {
    engine: HashEngine,
}

impl TransactionIdentifier {
    /// Returns a new identifier that hashes with `engine`.
    pub fn new(engine: HashEngine) -> Self {
        Self { engine }
    }

    /// Returns the hash engine of this identifier.
    pub fn engine(&self) -> HashEngine {
        self.engine
    }

    /// Returns the identifier of `transaction`.
    ///
    /// Only the unsigned payload is hashed.
    pub fn identify(&self, transaction: &Transaction) -> Hash {
        Hash(self.engine.digest(transaction.raw_data()))
    }
}
