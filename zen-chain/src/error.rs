//! Errors that can occur inside any `zen-chain` submodule.

use thiserror::Error;

/// Errors related to random bytes generation.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum RandError {
    /// Error of the `try_fill_bytes` function.
    #[error("failed to generate a secure stream of random bytes")]
    FillBytes,
}

/// An error type pertaining to key generation and parsing.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyError {
    /// Errors of type `RandError`.
    #[error("Randomness generation failure")]
    InsufficientRandomness(#[from] RandError),

    /// A key was supplied with the wrong number of bytes.
    #[error("{kind} must be 32 bytes, got {len} bytes")]
    InvalidLength {
        /// The name of the key component.
        kind: &'static str,
        /// The length of the rejected key.
        len: usize,
    },
}
