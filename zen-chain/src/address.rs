//! Transparent account and contract address types.
//!
//! At the API boundary, addresses are 21 bytes: a one byte network prefix
//! (`0x41` on mainnet) followed by the 20 byte account identifier. The
//! virtual machine only understands the 20 byte form, so the prefix is
//! stripped before an address is handed to contract-level code.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The length of an address with its network prefix.
pub const ADDRESS_LEN: usize = 21;

/// The length of an address without its network prefix.
pub const TVM_ADDRESS_LEN: usize = 20;

/// The network prefix used by mainnet addresses.
pub const MAINNET_PREFIX: u8 = 0x41;

/// A transparent account or contract address.
///
/// Any prefix byte is accepted: the prefix is not checked against a network.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Address {
    /// The network prefix byte.
    prefix: u8,
    /// The account identifier used by the virtual machine.
    payload: [u8; TVM_ADDRESS_LEN],
}

impl Address {
    /// Returns a new address from its prefix and payload.
    pub fn new(prefix: u8, payload: [u8; TVM_ADDRESS_LEN]) -> Self {
        Self { prefix, payload }
    }

    /// Returns the network prefix byte.
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Returns the 20 byte form of this address, without its network prefix.
    pub fn tvm_bytes(&self) -> [u8; TVM_ADDRESS_LEN] {
        self.payload
    }

    /// Returns the 21 byte form of this address, with its network prefix.
    pub fn to_bytes(&self) -> [u8; ADDRESS_LEN] {
        let mut bytes = [0; ADDRESS_LEN];
        bytes[0] = self.prefix;
        bytes[1..].copy_from_slice(&self.payload);
        bytes
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != ADDRESS_LEN {
            return Err(Error::InvalidLength { len: bytes.len() });
        }

        let mut payload = [0; TVM_ADDRESS_LEN];
        payload.copy_from_slice(&bytes[1..]);

        Ok(Self {
            prefix: bytes[0],
            payload,
        })
    }
}

impl TryFrom<Vec<u8>> for Address {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        bytes.as_slice().try_into()
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        let mut payload = [0; TVM_ADDRESS_LEN];
        payload.copy_from_slice(&bytes[1..]);

        Self {
            prefix: bytes[0],
            payload,
        }
    }
}

impl From<Address> for Vec<u8> {
    fn from(address: Address) -> Self {
        address.to_bytes().to_vec()
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Address")
            .field("prefix", &format_args!("{:#04x}", self.prefix))
            .field("payload", &hex::encode(self.payload))
            .finish()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&hex::encode(self.to_bytes()))
    }
}

/// Errors that can be returned when parsing an [`Address`].
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The address does not have exactly [`ADDRESS_LEN`] bytes.
    #[error("address must be {ADDRESS_LEN} bytes, got {len} bytes")]
    InvalidLength {
        /// The length of the rejected address.
        len: usize,
    },
}
