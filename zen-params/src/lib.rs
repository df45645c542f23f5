//! Validation and assembly of shielded TRC-20 transfer parameters.
//!
//! A shielded TRC-20 request moves value between a token contract's
//! transparent balances and its shielded pool. Before any proof is
//! generated, this crate:
//!
//! 1. parses the public amounts and rescales them into the pool's internal
//!    unit, using the scaling factor stored in the contract,
//! 2. checks that every note value is non-negative, and that burns balance,
//! 3. classifies the request as a mint, transfer or burn, rejecting any
//!    request that does not exactly match one of those shapes, and
//! 4. assembles spend and output descriptors, and hands them to an external
//!    proof builder.
//!
//! Validation failures never reach the proof builder: the builder is only
//! called once every check has passed.
//!
//! ## Collaborators
//!
//! The chain query service is a [`tower::Service`]. The proof builder,
//! payment address codec and burn memo encryption are traits in the
//! [`builder`] module, so that callers can plug in their own
//! implementations.

// Standard lints
#![warn(missing_docs)]
#![allow(clippy::try_err)]
#![deny(clippy::await_holding_lock)]
#![forbid(unsafe_code)]

mod config;

pub mod amount;
pub mod assemble;
pub mod balance;
pub mod builder;
pub mod classify;
pub mod error;
pub mod oracle;
pub mod query;
pub mod request;

#[cfg(test)]
mod tests;

pub use assemble::{Assembler, Descriptors};
pub use classify::OperationType;
pub use config::Config;
pub use error::ParameterError;
pub use request::Request;

/// A boxed [`std::error::Error`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
