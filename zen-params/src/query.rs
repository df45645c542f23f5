//! Requests and responses for the read-only chain query service.
//!
//! The query service is a [`tower::Service<Request>`] returning
//! [`Response`]s, with [`BoxError`](crate::BoxError) errors. It only reads
//! contract state: calling it never changes the chain.

use zen_chain::address::Address;

/// A read-only query against contract state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Request {
    /// Calls a constant contract method, and returns its result without
    /// creating a transaction.
    TriggerConstantContract {
        /// The contract to call, with its network prefix.
        contract_address: Address,
        /// The ABI encoded call data: a method selector followed by its
        /// arguments.
        data: Vec<u8>,
    },
}

/// A response to a chain query [`Request`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Response {
    /// The result of a constant contract call, split into the chunks
    /// returned by the node.
    ///
    /// Responds to [`Request::TriggerConstantContract`].
    ConstantResult(Vec<Vec<u8>>),
}
