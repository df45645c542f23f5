//! Shielded key components and spend credentials.
//!
//! "The spend authorizing key ask, proof authorizing key (ak, nsk),
//! full viewing key (ak, nk, ovk), incoming viewing key ivk, and each
//! diversified payment address addr_d = (d, pk_d) are derived from sk."
//!
//! Key derivation and all curve arithmetic happen in the proof builder.
//! These types only carry the encoded key bytes, and keep secret bytes out
//! of logs.

use std::fmt;

use rand_core::{CryptoRng, RngCore};

use crate::error::{KeyError, RandError};


/// The length of every encoded key component.
pub const KEY_LEN: usize = 32;

/// Defines a 32 byte key component.
///
/// Secret components have a redacted `Debug` impl.
macro_rules! key_component {
    (@define $(#[$doc:meta])* $name:ident, $kind:literal) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq)]
        pub struct $name([u8; KEY_LEN]);

        impl $name {
            /// Returns the encoded bytes of this key component.
            pub fn to_bytes(&self) -> [u8; KEY_LEN] {
                self.0
            }
        }

        impl From<[u8; KEY_LEN]> for $name {
            fn from(bytes: [u8; KEY_LEN]) -> Self {
                Self(bytes)
            }
        }

        impl From<$name> for [u8; KEY_LEN] {
            fn from(key: $name) -> [u8; KEY_LEN] {
                key.0
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = KeyError;

            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                let bytes: [u8; KEY_LEN] = bytes.try_into().map_err(|_| KeyError::InvalidLength {
                    kind: $kind,
                    len: bytes.len(),
                })?;

                Ok(Self(bytes))
            }
        }
    };
    ($(#[$doc:meta])* $name:ident, $kind:literal, secret) => {
        key_component!(@define $(#[$doc])* $name, $kind);

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&"<redacted>").finish()
            }
        }
    };
    ($(#[$doc:meta])* $name:ident, $kind:literal, public) => {
        key_component!(@define $(#[$doc])* $name, $kind);

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.debug_tuple(stringify!($name))
                    .field(&hex::encode(self.0))
                    .finish()
            }
        }
    };
}

key_component!(
    /// A _Spend Authorizing Key_, `ask`.
    ///
    /// Signs spend authorizations. Requests that carry `ask` can be built
    /// with full authorization.
    SpendAuthorizingKey,
    "ask",
    secret
);

key_component!(
    /// An _Authorizing Key_, `ak`, the public counterpart of `ask`.
    ///
    /// Requests that only carry `ak` produce parameters that the client
    /// signs later.
    AuthorizingKey,
    "ak",
    public
);

key_component!(
    /// A _Proof Authorizing Key_ secret, `nsk`, used to derive nullifiers.
    NullifierPrivateKey,
    "nsk",
    secret
);

key_component!(
    /// An _Outgoing Viewing Key_, `ovk`.
    ///
    /// Lets the sender decrypt the outputs they created.
    OutgoingViewingKey,
    "ovk",
    secret
);

impl OutgoingViewingKey {
    /// Generate a new _OutgoingViewingKey_ from a cryptographically secure
    /// random source.
    ///
    /// Used when a mint request does not supply its own viewing key.
    pub fn new<T>(csprng: &mut T) -> Result<Self, KeyError>
    where
        T: RngCore + CryptoRng,
    {
        let mut bytes = [0u8; KEY_LEN];
        csprng
            .try_fill_bytes(&mut bytes)
            .map_err(|_| KeyError::from(RandError::FillBytes))?;

        Ok(Self(bytes))
    }
}

/// An _Expanded Spending Key_, `(ask, nsk, ovk)`.
///
/// <https://zips.z.cash/protocol/protocol.pdf#saplingkeycomponents>
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ExpandedSpendingKey {
    /// The spend authorizing key.
    pub ask: SpendAuthorizingKey,
    /// The nullifier private key.
    pub nsk: NullifierPrivateKey,
    /// The outgoing viewing key.
    pub ovk: OutgoingViewingKey,
}

impl ExpandedSpendingKey {
    /// Returns an expanded spending key from its components.
    pub fn new(ask: SpendAuthorizingKey, nsk: NullifierPrivateKey, ovk: OutgoingViewingKey) -> Self {
        Self { ask, nsk, ovk }
    }
}

/// A _Proof Generation Key_, `(ak, nsk)`.
///
/// Enough to create spend proofs, but not to sign them.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ProofGenerationKey {
    /// The authorizing key.
    pub ak: AuthorizingKey,
    /// The nullifier private key.
    pub nsk: NullifierPrivateKey,
}

/// The spend key material supplied with a request.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SpendAuthorization {
    /// The raw spend authorizing key and nullifier key.
    Raw {
        /// The spend authorizing key.
        ask: SpendAuthorizingKey,
        /// The nullifier private key.
        nsk: NullifierPrivateKey,
    },

    /// An already derived proof generation key.
    Derived(ProofGenerationKey),
}

/// Everything needed to authorize the spends of one request.
///
/// Both variants authorize the same spends. A [`Credential::RawSpendKey`]
/// can also sign them.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Credential {
    /// An expanded spending key, `(ask, nsk, ovk)`.
    RawSpendKey(ExpandedSpendingKey),

    /// A proof generation key `(ak, nsk)`, with the outgoing viewing key.
    DerivedKey {
        /// The proof generation key.
        key: ProofGenerationKey,
        /// The outgoing viewing key.
        ovk: OutgoingViewingKey,
    },
}

impl Credential {
    /// Combines spend key material with an outgoing viewing key.
    pub fn new(authorization: SpendAuthorization, ovk: OutgoingViewingKey) -> Self {
        match authorization {
            SpendAuthorization::Raw { ask, nsk } => {
                Credential::RawSpendKey(ExpandedSpendingKey::new(ask, nsk, ovk))
            }
            SpendAuthorization::Derived(key) => Credential::DerivedKey { key, ovk },
        }
    }

    /// Returns the outgoing viewing key of this credential.
    pub fn ovk(&self) -> OutgoingViewingKey {
        match self {
            Credential::RawSpendKey(expsk) => expsk.ovk,
            Credential::DerivedKey { ovk, .. } => *ovk,
        }
    }

    /// Returns the nullifier private key of this credential.
    pub fn nsk(&self) -> NullifierPrivateKey {
        match self {
            Credential::RawSpendKey(expsk) => expsk.nsk,
            Credential::DerivedKey { key, .. } => key.nsk,
        }
    }

    /// Returns `true` if this credential can sign spend authorizations.
    pub fn can_sign(&self) -> bool {
        matches!(self, Credential::RawSpendKey(_))
    }
}

/// A _Diversifier_, as described in [protocol specification §4.2.2][ps].
///
/// [ps]: https://zips.z.cash/protocol/protocol.pdf#saplingkeycomponents
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Diversifier(pub [u8; 11]);

impl fmt::Debug for Diversifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Diversifier")
            .field(&hex::encode(self.0))
            .finish()
    }
}

impl From<[u8; 11]> for Diversifier {
    fn from(bytes: [u8; 11]) -> Self {
        Self(bytes)
    }
}

key_component!(
    /// A diversified _Transmission Key_, `pk_d`.
    TransmissionKey,
    "pk_d",
    public
);

/// A decoded shielded payment address, `(d, pk_d)`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PaymentAddress {
    /// The diversifier.
    pub diversifier: Diversifier,
    /// The diversified transmission key.
    pub transmission_key: TransmissionKey,
}
