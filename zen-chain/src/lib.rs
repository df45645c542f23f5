//! Core data structures for shielded TRC-20 pools.
//!
//! A shielded TRC-20 pool is the private balance ledger attached to a token
//! contract. Value moves between the contract's transparent balances and the
//! pool's shielded notes by minting, transferring or burning.
//!
//! This crate only contains the types that flow through parameter
//! construction. Validation lives in `zen-params`.

// Standard lints
#![warn(missing_docs)]
#![allow(clippy::try_err)]
#![deny(clippy::await_holding_lock)]
#![forbid(unsafe_code)]

pub mod address;
pub mod amount;
pub mod error;
pub mod keys;
pub mod note;
pub mod transaction;
