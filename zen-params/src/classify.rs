//! Classifies shielded requests as mints, transfers or burns.
//!
//! Classification is a pure function of a request's amounts and note counts.
//! The three operation shapes are mutually exclusive, and every request
//! that doesn't match exactly one of them is rejected.

use std::fmt;

use zen_chain::amount::{Amount, NonNegative};

use crate::{amount::ScaledAmounts, balance::NoteValues, error::ParameterError};


/// The maximum number of spend notes in a transfer.
pub const MAX_TRANSFER_SPENDS: usize = 2;

/// The maximum number of receive notes in a transfer.
pub const MAX_TRANSFER_RECEIVES: usize = 2;

/// The kind of a shielded TRC-20 operation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum OperationType {
    /// Deposits transparent tokens into one new shielded note.
    Mint,
    /// Moves value between shielded notes.
    Transfer,
    /// Withdraws shielded value to a transparent address, with optional change.
    Burn,
}

impl OperationType {
    /// Returns the lowercase name of this operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Mint => "mint",
            OperationType::Transfer => "transfer",
            OperationType::Burn => "burn",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The facts about a request that decide its operation type.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct RequestShape {
    /// The scaled transparent deposit.
    pub scaled_from: Amount<NonNegative>,
    /// The scaled transparent withdrawal.
    pub scaled_to: Amount<NonNegative>,
    /// The number of spend notes.
    pub spend_count: usize,
    /// The number of receive notes.
    pub receive_count: usize,
    /// The value leaving the pool, from [`total_output_value`](crate::balance::total_output_value).
    pub total_output_value: Amount<NonNegative>,
    /// The value of the first receive note.
    pub first_receive_value: Option<Amount<NonNegative>>,
    /// The value of the first spend note.
    pub first_spend_value: Option<Amount<NonNegative>>,
}

impl RequestShape {
    /// Returns the shape of a request with `scaled` amounts and note `values`.
    pub fn new(
        scaled: ScaledAmounts,
        values: &NoteValues,
        total_output_value: Amount<NonNegative>,
    ) -> Self {
        Self {
            scaled_from: scaled.from,
            scaled_to: scaled.to,
            spend_count: values.spends.len(),
            receive_count: values.receives.len(),
            total_output_value,
            first_receive_value: values.first_receive(),
            first_spend_value: values.first_spend(),
        }
    }

    fn is_mint(&self) -> bool {
        self.scaled_from.is_positive()
            && self.spend_count == 0
            && self.receive_count == 1
            && self.first_receive_value == Some(self.scaled_from)
            && self.scaled_to.value() == 0
    }

    fn is_transfer(&self) -> bool {
        self.scaled_from.value() == 0
            && (1..=MAX_TRANSFER_SPENDS).contains(&self.spend_count)
            && (1..=MAX_TRANSFER_RECEIVES).contains(&self.receive_count)
            && self.scaled_to.value() == 0
    }

    fn is_burn(&self) -> bool {
        self.scaled_from.value() == 0
            && self.spend_count == 1
            && self.receive_count <= 1
            && self.scaled_to.is_positive()
            && self.first_spend_value == Some(self.total_output_value)
    }
}

/// Returns the operation type of a request with `shape`.
///
/// Rows are checked in order, mint first, then transfer, then burn.
pub fn classify(shape: &RequestShape) -> Result<OperationType, ParameterError> {
    if shape.is_mint() {
        Ok(OperationType::Mint)
    } else if shape.is_transfer() {
        Ok(OperationType::Transfer)
    } else if shape.is_burn() {
        Ok(OperationType::Burn)
    } else {
        Err(ParameterError::InvalidShieldedParameters)
    }
}
