//! Assembles validated shielded requests into proof builder calls.
//!
//! Assembly happens in two stages:
//! 1. [`Assembler::descriptors`] validates and classifies a request, and
//!    produces every spend and output it needs, and
//! 2. [`Descriptors::apply`] hands those descriptors to a [`ProofBuilder`].
//!
//! The builder is only touched in the second stage, so a rejected request
//! never leaves a partially configured builder behind.

use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};
use tower::Service;
use tracing::instrument;

use zen_chain::{
    address::{Address, TVM_ADDRESS_LEN},
    amount::{Amount, NonNegative, PublicAmount},
    keys::{Credential, OutgoingViewingKey, PaymentAddress},
    note::{ReceiveNote, SpendNote},
};

use crate::{
    amount::{parse_amount, scale},
    balance::{check_non_negative, total_output_value},
    builder::{AddressCodec, NoteEncryption, OutputDescription, ProofBuilder, SpendDescription},
    classify::{classify, OperationType, RequestShape},
    error::ParameterError,
    oracle::ScalingFactorOracle,
    query, BoxError, Config, Request,
};

#[cfg(test)]
mod tests;

/// The transparent side of a burn.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransparentOutput {
    /// The destination address, without its network prefix.
    pub address: [u8; TVM_ADDRESS_LEN],
    /// The unscaled amount withdrawn.
    pub amount: PublicAmount,
}

/// Everything a proof builder needs for one validated request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Descriptors {
    /// The operation type of the request.
    pub operation: OperationType,

    /// The shielded pool contract address, without its network prefix.
    pub shielded_address: [u8; TVM_ADDRESS_LEN],

    /// The unscaled amount deposited by a mint.
    pub transparent_from_amount: Option<PublicAmount>,

    /// The destination and unscaled amount of a burn.
    pub transparent_to: Option<TransparentOutput>,

    /// The encrypted burn memo, if encryption succeeded.
    pub burn_ciphertext: Option<Vec<u8>>,

    /// The spends, in request order.
    pub spends: Vec<SpendDescription>,

    /// The outputs, in request order.
    pub outputs: Vec<OutputDescription>,

    /// Whether the builder should also sign the spends.
    pub full_authorization: bool,
}

impl Descriptors {
    fn new(operation: OperationType, shielded_address: &Address, full_authorization: bool) -> Self {
        Self {
            operation,
            shielded_address: shielded_address.tvm_bytes(),
            transparent_from_amount: None,
            transparent_to: None,
            burn_ciphertext: None,
            spends: Vec::new(),
            outputs: Vec::new(),
            full_authorization,
        }
    }

    /// Configures `builder` with these descriptors, and builds the parameters.
    pub fn apply<B>(self, mut builder: B) -> Result<B::Parameters, ParameterError>
    where
        B: ProofBuilder,
    {
        builder.set_type(self.operation);
        builder.set_shielded_address(self.shielded_address);

        if let Some(amount) = &self.transparent_from_amount {
            builder.set_transparent_from_amount(amount);
        }

        if let Some(TransparentOutput { address, amount }) = &self.transparent_to {
            builder.set_transparent_to_address(*address);
            builder.set_transparent_to_amount(amount);
        }

        if let Some(ciphertext) = self.burn_ciphertext {
            builder.set_burn_ciphertext(ciphertext);
        }

        for spend in self.spends {
            builder.add_spend(spend).map_err(ParameterError::Builder)?;
        }

        for output in self.outputs {
            builder.add_output(output).map_err(ParameterError::Builder)?;
        }

        builder
            .build(self.full_authorization)
            .map_err(ParameterError::Builder)
    }
}

/// Validates shielded TRC-20 requests, and assembles their proof parameters.
///
/// An assembler holds no per-request state, so clones can serve independent
/// requests concurrently.
#[derive(Clone, Debug)]
pub struct Assembler<Q, A, N> {
    /// Reads pool scaling factors from the chain.
    oracle: ScalingFactorOracle<Q>,

    /// Decodes note payment addresses.
    address_codec: A,

    /// Encrypts burn memos.
    note_encryption: N,
}

impl<Q, A, N> Assembler<Q, A, N>
where
    Q: Service<query::Request, Response = query::Response, Error = BoxError>
        + Clone
        + Send
        + 'static,
    Q::Future: Send + 'static,
    A: AddressCodec,
    N: NoteEncryption,
{
    /// Returns a new assembler, using `query` to read scaling factors.
    pub fn new(config: &Config, query: Q, address_codec: A, note_encryption: N) -> Self {
        Self {
            oracle: ScalingFactorOracle::new(query, &config.scaling_factor_method),
            address_codec,
            note_encryption,
        }
    }

    /// Validates `request`, and builds its parameters with `builder`.
    ///
    /// Mints without an outgoing viewing key get a new random key from `rng`.
    #[instrument(
        name = "assemble",
        skip_all,
        fields(spends = request.spends.len(), receives = request.receives.len())
    )]
    pub async fn assemble<B, R>(
        &self,
        request: Request,
        builder: B,
        rng: &mut R,
    ) -> Result<B::Parameters, ParameterError>
    where
        B: ProofBuilder,
        R: RngCore + CryptoRng,
    {
        let result = match self.descriptors(&request, rng).await {
            Ok(descriptors) => {
                let verdicts = match descriptors.operation {
                    OperationType::Mint => metrics::counter!("shielded.params.mint.count"),
                    OperationType::Transfer => {
                        metrics::counter!("shielded.params.transfer.count")
                    }
                    OperationType::Burn => metrics::counter!("shielded.params.burn.count"),
                };
                verdicts.increment(1);

                descriptors.apply(builder)
            }
            Err(error) => Err(error),
        };

        if let Err(error) = &result {
            metrics::counter!("shielded.params.rejected.count", "reason" => error.kind())
                .increment(1);
            tracing::debug!(?error, "rejected shielded request");
        }

        result
    }

    /// Validates `request`, and builds its parameters with `builder`, using
    /// the operating system's random number generator.
    pub async fn assemble_with_os_rng<B>(
        &self,
        request: Request,
        builder: B,
    ) -> Result<B::Parameters, ParameterError>
    where
        B: ProofBuilder,
    {
        self.assemble(request, builder, &mut OsRng).await
    }

    /// Validates and classifies `request`, and returns its descriptors.
    ///
    /// Queries the pool's scaling factor, but has no other side effects.
    pub async fn descriptors<R>(
        &self,
        request: &Request,
        rng: &mut R,
    ) -> Result<Descriptors, ParameterError>
    where
        R: RngCore + CryptoRng,
    {
        let shielded_address = Address::try_from(request.shielded_contract_address.as_slice())
            .map_err(ParameterError::address("shielded contract address"))?;

        let from_amount = parse_amount(&request.from_amount)?;
        let to_amount = parse_amount(&request.to_amount)?;

        let scaled = scale(&self.oracle, shielded_address, &from_amount, &to_amount).await?;

        let values = check_non_negative(&request.spends, &request.receives)?;
        let total_output_value = total_output_value(scaled.to, &values.receives)?;

        let shape = RequestShape::new(scaled, &values, total_output_value);
        let operation = classify(&shape)?;

        tracing::debug!(%operation, ?shape, "classified shielded request");
        let mut descriptors = Descriptors::new(
            operation,
            &shielded_address,
            request.has_full_authorization(),
        );

        match operation {
            OperationType::Mint => {
                let ovk = match request.ovk {
                    Some(ovk) => ovk,
                    None => OutgoingViewingKey::new(rng)?,
                };

                descriptors.transparent_from_amount = Some(from_amount);
                descriptors.outputs = self.outputs(ovk, &request.receives, &values.receives)?;
            }

            OperationType::Transfer => {
                let credential = request.credential()?;

                descriptors.spends = self.spends(credential, &request.spends, &values.spends)?;
                descriptors.outputs =
                    self.outputs(credential.ovk(), &request.receives, &values.receives)?;
            }

            OperationType::Burn => {
                let credential = request.credential()?;
                let destination = Address::try_from(request.transparent_to_address.as_slice())
                    .map_err(ParameterError::address("transparent to address"))?;

                descriptors.spends = self.spends(credential, &request.spends, &values.spends)?;
                descriptors.outputs =
                    self.outputs(credential.ovk(), &request.receives, &values.receives)?;

                descriptors.burn_ciphertext = match self.note_encryption.encrypt_burn_memo(
                    &credential.ovk(),
                    &to_amount,
                    &destination,
                ) {
                    Ok(ciphertext) => Some(ciphertext),
                    Err(error) => {
                        tracing::warn!(
                            ?error,
                            "burn memo encryption failed, building burn without a memo"
                        );
                        None
                    }
                };

                descriptors.transparent_to = Some(TransparentOutput {
                    address: destination.tvm_bytes(),
                    amount: to_amount,
                });
            }
        }

        Ok(descriptors)
    }

    fn spends(
        &self,
        credential: Credential,
        notes: &[SpendNote],
        values: &[Amount<NonNegative>],
    ) -> Result<Vec<SpendDescription>, ParameterError> {
        notes
            .iter()
            .zip(values)
            .map(|(spend, value)| -> Result<SpendDescription, ParameterError> {
                Ok(SpendDescription {
                    credential,
                    address: self.decode(&spend.note.payment_address)?,
                    value: *value,
                    rcm: spend.note.rcm,
                    alpha: spend.alpha,
                    root: spend.root,
                    path: spend.path.clone(),
                    position: spend.position,
                })
            })
            .collect()
    }

    fn outputs(
        &self,
        ovk: OutgoingViewingKey,
        notes: &[ReceiveNote],
        values: &[Amount<NonNegative>],
    ) -> Result<Vec<OutputDescription>, ParameterError> {
        notes
            .iter()
            .zip(values)
            .map(|(receive, value)| -> Result<OutputDescription, ParameterError> {
                Ok(OutputDescription {
                    ovk,
                    address: self.decode(&receive.note.payment_address)?,
                    value: *value,
                    rcm: receive.note.rcm,
                    memo: receive.note.memo.clone(),
                })
            })
            .collect()
    }

    fn decode(&self, payment_address: &str) -> Result<PaymentAddress, ParameterError> {
        self.address_codec
            .decode(payment_address)
            .map_err(ParameterError::PaymentAddress)
    }
}
