//! Shielded notes, as supplied by clients when building shielded parameters.
//!
//! A note's value is counted in the pool's internal unit. Values arrive
//! unchecked, so they are stored as [`Amount<NegativeAllowed>`] and must be
//! constrained to [`NonNegative`](crate::amount::NonNegative) before use.

use std::fmt;

use crate::amount::{Amount, NegativeAllowed};

/// A shielded note, before its payment address is decoded.
#[derive(Clone, Eq, PartialEq)]
pub struct Note {
    /// The value of the note, in the pool's internal unit.
    pub value: Amount<NegativeAllowed>,
    /// The encoded shielded payment address of the note's owner.
    pub payment_address: String,
    /// The note commitment randomness, `rcm`.
    pub rcm: [u8; 32],
    /// The memo field.
    pub memo: Vec<u8>,
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Note")
            .field("value", &self.value)
            .field("payment_address", &self.payment_address)
            .field("rcm", &hex::encode(self.rcm))
            .field("memo_len", &self.memo.len())
            .finish()
    }
}

/// A note that the request wants to spend, with its commitment tree witness.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpendNote {
    /// The note being spent.
    pub note: Note,
    /// The spend authorization randomizer, `alpha`.
    pub alpha: [u8; 32],
    /// The note commitment tree root that `path` leads to.
    pub root: [u8; 32],
    /// The encoded authentication path of the note in the commitment tree.
    pub path: Vec<u8>,
    /// The position of the note in the commitment tree.
    pub position: u64,
}

/// A note that the request wants to create.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReceiveNote {
    /// The note being created.
    pub note: Note,
}

impl SpendNote {
    /// Returns the value of the spent note.
    pub fn value(&self) -> Amount<NegativeAllowed> {
        self.note.value
    }
}

impl ReceiveNote {
    /// Returns the value of the created note.
    pub fn value(&self) -> Amount<NegativeAllowed> {
        self.note.value
    }
}
