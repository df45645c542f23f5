//! Errors that can occur when validating and assembling shielded parameters.
//!
//! Every variant is a local failure reported to the caller. Failures are
//! detected before the proof builder is called, so a rejected request never
//! leaves a partially built parameter object behind.

use thiserror::Error;

use zen_chain::{address, amount::PublicAmountError, error::KeyError};

use crate::BoxError;

/// Which side of a request a note belongs to.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NoteKind {
    /// A note being spent.
    Spend,
    /// A note being created.
    Receive,
}

impl std::fmt::Display for NoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            NoteKind::Spend => "spend",
            NoteKind::Receive => "receive",
        })
    }
}

/// An error validating or assembling shielded parameters.
#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum ParameterError {
    #[error("public amount {text:?} is not a decimal integer")]
    MalformedAmount { text: String },

    #[error("public amount must be non-negative, got {value}")]
    NegativeAmount { value: String },

    #[error("public amount must be no more than 256 bits, got {bits} bits")]
    AmountTooLarge { bits: u64 },

    /// The amount is not a multiple of the scaling factor, or the scaled
    /// amount does not fit in an `i64`.
    #[error("invalid from_amount or to_amount")]
    InvalidAmount(#[source] PublicAmountError),

    #[error("scaling factor query returned an invalid result: {0}")]
    OracleProtocolError(String),

    /// The chain query service failed.
    #[error("scaling factor query failed")]
    Oracle(#[source] BoxError),

    #[error("{kind} note {index} has negative value {value}")]
    NegativeNoteValue {
        kind: NoteKind,
        index: usize,
        value: i64,
    },

    #[error("burn output value overflowed")]
    UnbalancedBurn(#[source] zen_chain::amount::Error),

    /// The request does not match a mint, transfer or burn.
    #[error("invalid shielded TRC-20 parameters")]
    InvalidShieldedParameters,

    #[error("invalid {field}")]
    InvalidAddress {
        field: &'static str,
        #[source]
        source: address::Error,
    },

    #[error("no spend authorization or outgoing viewing key")]
    MissingCredentials,

    /// The address codec rejected a note's payment address.
    #[error("payment address format is wrong")]
    PaymentAddress(#[source] BoxError),

    /// The proof builder rejected a descriptor, or failed to build.
    #[error("proof builder failed")]
    Builder(#[source] BoxError),

    #[error("could not generate an outgoing viewing key")]
    Randomness(#[from] KeyError),
}

impl ParameterError {
    /// Returns a short, static name for this error, for use in metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            ParameterError::MalformedAmount { .. } => "malformed_amount",
            ParameterError::NegativeAmount { .. } => "negative_amount",
            ParameterError::AmountTooLarge { .. } => "amount_too_large",
            ParameterError::InvalidAmount(_) => "invalid_amount",
            ParameterError::OracleProtocolError(_) => "oracle_protocol",
            ParameterError::Oracle(_) => "oracle",
            ParameterError::NegativeNoteValue { .. } => "negative_note_value",
            ParameterError::UnbalancedBurn(_) => "unbalanced_burn",
            ParameterError::InvalidShieldedParameters => "invalid_shielded_parameters",
            ParameterError::InvalidAddress { .. } => "invalid_address",
            ParameterError::MissingCredentials => "missing_credentials",
            ParameterError::PaymentAddress(_) => "payment_address",
            ParameterError::Builder(_) => "builder",
            ParameterError::Randomness(_) => "randomness",
        }
    }

    /// Returns an address error for `field`.
    pub(crate) fn address(field: &'static str) -> impl FnOnce(address::Error) -> Self {
        move |source| ParameterError::InvalidAddress { field, source }
    }
}

impl From<PublicAmountError> for ParameterError {
    fn from(err: PublicAmountError) -> Self {
        match err {
            PublicAmountError::Malformed { text } => ParameterError::MalformedAmount { text },
            PublicAmountError::Negative { value } => ParameterError::NegativeAmount { value },
            PublicAmountError::TooLarge { bits } => ParameterError::AmountTooLarge { bits },
            err @ (PublicAmountError::DivideByZero
            | PublicAmountError::Remainder { .. }
            | PublicAmountError::QuotientOverflow { .. }) => ParameterError::InvalidAmount(err),
        }
    }
}
