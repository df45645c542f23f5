//! Test doubles for the chain query service and the proof builder collaborators.

use std::{
    collections::HashMap,
    num::NonZeroU32,
    sync::{Arc, Mutex},
};

use metrics::{Counter, CounterFn, Gauge, Histogram, Key, KeyName, Metadata, SharedString, Unit};
use rand_core::{CryptoRng, RngCore};
use tower::{service_fn, util::BoxCloneService};

use zen_chain::{
    address::{Address, TVM_ADDRESS_LEN},
    amount::{Amount, PublicAmount},
    keys::{Diversifier, OutgoingViewingKey, PaymentAddress, TransmissionKey},
    note::{Note, ReceiveNote, SpendNote},
};

use crate::{
    builder::{AddressCodec, NoteEncryption, OutputDescription, ProofBuilder, SpendDescription},
    classify::OperationType,
    query::{Request, Response},
    BoxError,
};

/// The prefix of every payment address accepted by [`FakeAddressCodec`].
pub const PAYMENT_ADDRESS_PREFIX: &str = "ztron1";

/// A chain query service, as seen by the assembler.
pub type ChainQuery = BoxCloneService<Request, Response, BoxError>;

/// The requests received by a fake chain query service.
pub type RecordedRequests = Arc<Mutex<Vec<Request>>>;

/// Returns a chain query service that always responds with `chunks`, and a
/// record of the requests it received.
pub fn chain_query(chunks: Vec<Vec<u8>>) -> (ChainQuery, RecordedRequests) {
    let requests = RecordedRequests::default();
    let recorder = requests.clone();

    let service = service_fn(move |request: Request| {
        recorder.lock().expect("unpoisoned").push(request);
        let chunks = chunks.clone();

        async move { Ok::<_, BoxError>(Response::ConstantResult(chunks)) }
    });

    (BoxCloneService::new(service), requests)
}

/// Returns a chain query service that always fails.
pub fn failing_chain_query() -> ChainQuery {
    BoxCloneService::new(service_fn(|_request: Request| async {
        Err::<Response, BoxError>("node unavailable".into())
    }))
}

/// Returns `factor` as a big-endian `uint256`, split over two chunks.
pub fn factor_chunks(factor: u64) -> Vec<Vec<u8>> {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&factor.to_be_bytes());

    vec![word[..16].to_vec(), word[16..].to_vec()]
}

/// Returns a payment address text that [`FakeAddressCodec`] accepts.
pub fn payment_address(owner: u8) -> String {
    format!("{PAYMENT_ADDRESS_PREFIX}{}", hex::encode([owner; 4]))
}

/// Returns a note with `value`, owned by a payment address derived from `value`.
pub fn note(value: i64) -> Note {
    Note {
        value: Amount::try_from(value).expect("every i64 is a valid amount"),
        payment_address: payment_address(value as u8),
        rcm: [0x0c; 32],
        memo: b"memo".to_vec(),
    }
}

/// Returns a spend note with `value`.
pub fn spend_note(value: i64) -> SpendNote {
    SpendNote {
        note: note(value),
        alpha: [0x0a; 32],
        root: [0x0b; 32],
        path: vec![0x0d; 64],
        position: 7,
    }
}

/// Returns a receive note with `value`.
pub fn receive_note(value: i64) -> ReceiveNote {
    ReceiveNote { note: note(value) }
}

/// An address codec that accepts [`PAYMENT_ADDRESS_PREFIX`] addresses, and
/// derives their components from the address text.
#[derive(Copy, Clone, Debug, Default)]
pub struct FakeAddressCodec;

impl AddressCodec for FakeAddressCodec {
    fn decode(&self, address: &str) -> Result<PaymentAddress, BoxError> {
        if !address.starts_with(PAYMENT_ADDRESS_PREFIX) {
            return Err(format!("unknown payment address prefix: {address:?}").into());
        }

        let mut diversifier = [0u8; 11];
        let mut transmission_key = [0u8; 32];
        for (i, byte) in address.bytes().enumerate() {
            diversifier[i % diversifier.len()] ^= byte;
            transmission_key[i % transmission_key.len()] ^= byte;
        }

        Ok(PaymentAddress {
            diversifier: Diversifier(diversifier),
            transmission_key: TransmissionKey::from(transmission_key),
        })
    }
}

/// A note encryption service that "encrypts" memos by concatenating their
/// inputs, or always fails.
#[derive(Copy, Clone, Debug, Default)]
pub struct FakeNoteEncryption {
    /// Fail every encryption.
    pub fail: bool,
}

impl NoteEncryption for FakeNoteEncryption {
    fn encrypt_burn_memo(
        &self,
        ovk: &OutgoingViewingKey,
        amount: &PublicAmount,
        destination: &Address,
    ) -> Result<Vec<u8>, BoxError> {
        if self.fail {
            return Err("memo encryption failed".into());
        }

        let mut ciphertext = ovk.to_bytes().to_vec();
        ciphertext.extend(amount.to_string().into_bytes());
        ciphertext.extend(destination.to_bytes());

        Ok(ciphertext)
    }
}

/// A call received by a [`RecordingBuilder`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BuilderCall {
    SetType(OperationType),
    SetShieldedAddress([u8; TVM_ADDRESS_LEN]),
    SetTransparentFromAmount(PublicAmount),
    SetTransparentToAmount(PublicAmount),
    SetTransparentToAddress([u8; TVM_ADDRESS_LEN]),
    SetBurnCiphertext(Vec<u8>),
    AddSpend(SpendDescription),
    AddOutput(OutputDescription),
}

/// The parameters built by a [`RecordingBuilder`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordedParameters {
    /// Every call made before `build`, in order.
    pub calls: Vec<BuilderCall>,
    /// The authorization flag passed to `build`.
    pub full_authorization: bool,
}

/// A proof builder that records the calls it receives.
///
/// The calls are shared, so they can be checked even when assembly fails.
#[derive(Clone, Debug, Default)]
pub struct RecordingBuilder {
    calls: Arc<Mutex<Vec<BuilderCall>>>,
    fail_build: bool,
}

impl RecordingBuilder {
    /// Returns a builder that fails when `build` is called.
    pub fn failing() -> Self {
        Self {
            fail_build: true,
            ..Self::default()
        }
    }

    /// Returns the calls this builder has received so far.
    pub fn calls(&self) -> Vec<BuilderCall> {
        self.calls.lock().expect("unpoisoned").clone()
    }

    fn record(&mut self, call: BuilderCall) {
        self.calls.lock().expect("unpoisoned").push(call);
    }
}

impl ProofBuilder for RecordingBuilder {
    type Parameters = RecordedParameters;

    fn set_type(&mut self, operation: OperationType) {
        self.record(BuilderCall::SetType(operation));
    }

    fn set_shielded_address(&mut self, address: [u8; TVM_ADDRESS_LEN]) {
        self.record(BuilderCall::SetShieldedAddress(address));
    }

    fn set_transparent_from_amount(&mut self, amount: &PublicAmount) {
        self.record(BuilderCall::SetTransparentFromAmount(amount.clone()));
    }

    fn set_transparent_to_amount(&mut self, amount: &PublicAmount) {
        self.record(BuilderCall::SetTransparentToAmount(amount.clone()));
    }

    fn set_transparent_to_address(&mut self, address: [u8; TVM_ADDRESS_LEN]) {
        self.record(BuilderCall::SetTransparentToAddress(address));
    }

    fn set_burn_ciphertext(&mut self, ciphertext: Vec<u8>) {
        self.record(BuilderCall::SetBurnCiphertext(ciphertext));
    }

    fn add_spend(&mut self, spend: SpendDescription) -> Result<(), BoxError> {
        self.record(BuilderCall::AddSpend(spend));
        Ok(())
    }

    fn add_output(&mut self, output: OutputDescription) -> Result<(), BoxError> {
        self.record(BuilderCall::AddOutput(output));
        Ok(())
    }

    fn build(self, full_authorization: bool) -> Result<Self::Parameters, BoxError> {
        if self.fail_build {
            return Err("proof generation failed".into());
        }

        Ok(RecordedParameters {
            calls: self.calls(),
            full_authorization,
        })
    }
}

/// A random number generator that always fails.
#[derive(Copy, Clone, Debug, Default)]
pub struct BrokenRng;

impl RngCore for BrokenRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
        let code = NonZeroU32::new(rand_core::Error::CUSTOM_START).expect("custom codes are non-zero");
        Err(code.into())
    }
}

impl CryptoRng for BrokenRng {}

/// A metrics recorder that counts counter increments by metric name.
#[derive(Clone, Debug, Default)]
pub struct CountingRecorder {
    counts: Arc<Mutex<HashMap<String, u64>>>,
}

impl CountingRecorder {
    /// Returns the current value of the counter called `name`.
    pub fn count(&self, name: &str) -> u64 {
        self.counts
            .lock()
            .expect("unpoisoned")
            .get(name)
            .copied()
            .unwrap_or_default()
    }
}

struct NamedCounter {
    name: String,
    counts: Arc<Mutex<HashMap<String, u64>>>,
}

impl CounterFn for NamedCounter {
    fn increment(&self, value: u64) {
        *self
            .counts
            .lock()
            .expect("unpoisoned")
            .entry(self.name.clone())
            .or_default() += value;
    }

    fn absolute(&self, value: u64) {
        self.counts
            .lock()
            .expect("unpoisoned")
            .insert(self.name.clone(), value);
    }
}

impl metrics::Recorder for CountingRecorder {
    fn describe_counter(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn describe_gauge(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn describe_histogram(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {
    }

    fn register_counter(&self, key: &Key, _metadata: &Metadata<'_>) -> Counter {
        Counter::from_arc(Arc::new(NamedCounter {
            name: key.name().to_string(),
            counts: self.counts.clone(),
        }))
    }

    fn register_gauge(&self, _key: &Key, _metadata: &Metadata<'_>) -> Gauge {
        Gauge::noop()
    }

    fn register_histogram(&self, _key: &Key, _metadata: &Metadata<'_>) -> Histogram {
        Histogram::noop()
    }
}
