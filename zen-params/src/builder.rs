//! Collaborators that turn validated descriptors into proof parameters.
//!
//! The proof builder, the payment address codec and the burn memo
//! encryption are provided by the caller. This crate only decides which
//! calls to make, and in what order.

use zen_chain::{
    address::{Address, TVM_ADDRESS_LEN},
    amount::{Amount, NonNegative, PublicAmount},
    keys::{Credential, OutgoingViewingKey, PaymentAddress},
};

use crate::{classify::OperationType, BoxError};

/// A spend of an existing shielded note.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpendDescription {
    /// The key material that authorizes this spend.
    pub credential: Credential,
    /// The decoded payment address of the spent note.
    pub address: PaymentAddress,
    /// The value of the spent note.
    pub value: Amount<NonNegative>,
    /// The note commitment randomness.
    pub rcm: [u8; 32],
    /// The spend authorization randomizer.
    pub alpha: [u8; 32],
    /// The note commitment tree root.
    pub root: [u8; 32],
    /// The authentication path of the note.
    pub path: Vec<u8>,
    /// The position of the note in the commitment tree.
    pub position: u64,
}

/// The creation of a new shielded note.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutputDescription {
    /// The outgoing viewing key the note is encrypted to.
    pub ovk: OutgoingViewingKey,
    /// The decoded payment address of the recipient.
    pub address: PaymentAddress,
    /// The value of the new note.
    pub value: Amount<NonNegative>,
    /// The note commitment randomness.
    pub rcm: [u8; 32],
    /// The memo field.
    pub memo: Vec<u8>,
}

/// Builds the proof parameters of a single request.
///
/// A builder is consumed by [`ProofBuilder::build`], so each builder
/// produces at most one set of parameters.
pub trait ProofBuilder {
    /// The finished parameter object.
    type Parameters;

    /// Sets the operation type.
    fn set_type(&mut self, operation: OperationType);

    /// Sets the shielded pool contract address, without its network prefix.
    fn set_shielded_address(&mut self, address: [u8; TVM_ADDRESS_LEN]);

    /// Sets the unscaled transparent amount deposited by a mint.
    fn set_transparent_from_amount(&mut self, amount: &PublicAmount);

    /// Sets the unscaled transparent amount withdrawn by a burn.
    fn set_transparent_to_amount(&mut self, amount: &PublicAmount);

    /// Sets the burn destination address, without its network prefix.
    fn set_transparent_to_address(&mut self, address: [u8; TVM_ADDRESS_LEN]);

    /// Sets the encrypted burn memo.
    fn set_burn_ciphertext(&mut self, ciphertext: Vec<u8>);

    /// Adds a spend.
    fn add_spend(&mut self, spend: SpendDescription) -> Result<(), BoxError>;

    /// Adds an output.
    fn add_output(&mut self, output: OutputDescription) -> Result<(), BoxError>;

    /// Builds the parameters.
    ///
    /// With `full_authorization`, spends are also signed. Otherwise the
    /// caller signs them later.
    fn build(self, full_authorization: bool) -> Result<Self::Parameters, BoxError>;
}

/// Decodes textual shielded payment addresses.
pub trait AddressCodec {
    /// Decodes `address` into its diversifier and transmission key.
    fn decode(&self, address: &str) -> Result<PaymentAddress, BoxError>;
}

/// Encrypts burn memos, so the sender can later recover their withdrawals.
pub trait NoteEncryption {
    /// Encrypts a memo recording that `amount` was burnt to `destination`.
    ///
    /// Failures are not fatal: the burn is built without a memo.
    fn encrypt_burn_memo(
        &self,
        ovk: &OutgoingViewingKey,
        amount: &PublicAmount,
        destination: &Address,
    ) -> Result<Vec<u8>, BoxError>;
}
