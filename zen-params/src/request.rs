//! Shielded TRC-20 parameter requests.

use zen_chain::{
    keys::{Credential, OutgoingViewingKey, SpendAuthorization},
    note::{ReceiveNote, SpendNote},
};

use crate::error::ParameterError;

/// A request to build shielded TRC-20 parameters.
///
/// Requests are loosely typed, as they arrive from the API layer:
/// [`Assembler::assemble`](crate::Assembler::assemble) decides which
/// operation a request is, and rejects requests that don't match any
/// operation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Request {
    /// The shielded pool contract address, with its network prefix.
    pub shielded_contract_address: Vec<u8>,

    /// The transparent amount deposited by a mint, as decimal text.
    pub from_amount: String,

    /// The transparent amount withdrawn by a burn, as decimal text.
    pub to_amount: String,

    /// The notes being spent.
    pub spends: Vec<SpendNote>,

    /// The notes being created.
    pub receives: Vec<ReceiveNote>,

    /// The key material that authorizes the spends.
    pub spend_authorization: Option<SpendAuthorization>,

    /// The outgoing viewing key for the new notes.
    ///
    /// Mints generate a random key if this is missing.
    pub ovk: Option<OutgoingViewingKey>,

    /// The burn destination address, with its network prefix.
    pub transparent_to_address: Vec<u8>,
}

impl Request {
    /// Returns the spend credential of this request.
    ///
    /// Transfers and burns need spend key material and an outgoing viewing key.
    pub fn credential(&self) -> Result<Credential, ParameterError> {
        match (self.spend_authorization, self.ovk) {
            (Some(authorization), Some(ovk)) => Ok(Credential::new(authorization, ovk)),
            _ => Err(ParameterError::MissingCredentials),
        }
    }

    /// Returns `true` if parameters for this request can be signed when
    /// they are built.
    ///
    /// Requests without spend key material, like mints, don't need signatures
    /// on spends, so they are built with full authorization.
    pub fn has_full_authorization(&self) -> bool {
        !matches!(
            self.spend_authorization,
            Some(SpendAuthorization::Derived(_))
        )
    }
}
