//! Transactions and their identifiers.
//!
//! A transaction is an unsigned payload plus the signatures over it.
//! Only the payload contributes to the transaction's identity, so a
//! transaction keeps its identifier when it is (re-)signed.

mod hash;


pub use hash::{Hash, HashEngine, TransactionIdentifier};

/// A transaction, as an encoded unsigned payload and its signatures.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Transaction {
    /// The encoded unsigned payload.
    raw_data: Vec<u8>,
    /// Signatures over the transaction identifier.
    signatures: Vec<Vec<u8>>,
}

impl Transaction {
    /// Returns a new unsigned transaction with `raw_data` as its payload.
    pub fn new(raw_data: Vec<u8>) -> Self {
        Self {
            raw_data,
            signatures: Vec::new(),
        }
    }

    /// Returns the encoded unsigned payload.
    pub fn raw_data(&self) -> &[u8] {
        &self.raw_data
    }

    /// Returns the signatures over this transaction.
    pub fn signatures(&self) -> &[Vec<u8>] {
        &self.signatures
    }

    /// Adds a signature to this transaction.
    ///
    /// Signing does not change the transaction's identifier.
    pub fn add_signature(&mut self, signature: Vec<u8>) {
        self.signatures.push(signature);
    }

    /// Replaces the unsigned payload of this transaction.
    ///
    /// Existing signatures were made over the old identifier, so they are
    /// dropped.
    pub fn set_raw_data(&mut self, raw_data: Vec<u8>) {
        self.raw_data = raw_data;
        self.signatures.clear();
    }
}
