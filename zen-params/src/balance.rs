//! Checks note values, and computes the output side of a burn.

use zen_chain::{
    amount::{Amount, NonNegative},
    note::{ReceiveNote, SpendNote},
};

use crate::error::{NoteKind, ParameterError};


/// The values of a request's notes, after they have been checked.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NoteValues {
    /// The value of each spend note, in request order.
    pub spends: Vec<Amount<NonNegative>>,
    /// The value of each receive note, in request order.
    pub receives: Vec<Amount<NonNegative>>,
}

impl NoteValues {
    /// Returns the value of the first spend note, if there is one.
    pub fn first_spend(&self) -> Option<Amount<NonNegative>> {
        self.spends.first().copied()
    }

    /// Returns the value of the first receive note, if there is one.
    pub fn first_receive(&self) -> Option<Amount<NonNegative>> {
        self.receives.first().copied()
    }
}

/// Checks that every spend and receive note has a non-negative value.
pub fn check_non_negative(
    spends: &[SpendNote],
    receives: &[ReceiveNote],
) -> Result<NoteValues, ParameterError> {
    let spends = spends
        .iter()
        .enumerate()
        .map(|(index, spend)| constrain(NoteKind::Spend, index, spend.value()))
        .collect::<Result<_, _>>()?;

    let receives = receives
        .iter()
        .enumerate()
        .map(|(index, receive)| constrain(NoteKind::Receive, index, receive.value()))
        .collect::<Result<_, _>>()?;

    Ok(NoteValues { spends, receives })
}

fn constrain(
    kind: NoteKind,
    index: usize,
    value: Amount,
) -> Result<Amount<NonNegative>, ParameterError> {
    value
        .constrain()
        .map_err(|_| ParameterError::NegativeNoteValue {
            kind,
            index,
            value: value.value(),
        })
}

/// Returns the total value leaving the pool in a burn.
///
/// When `scaled_to` is positive, this is `scaled_to` plus the value of the
/// first receive note. Later receive notes are not counted. Otherwise the
/// total is zero.
pub fn total_output_value(
    scaled_to: Amount<NonNegative>,
    receives: &[Amount<NonNegative>],
) -> Result<Amount<NonNegative>, ParameterError> {
    if !scaled_to.is_positive() {
        return Ok(Amount::zero());
    }

    match receives.first() {
        Some(change) => (scaled_to + *change).map_err(ParameterError::UnbalancedBurn),
        None => Ok(scaled_to),
    }
}
