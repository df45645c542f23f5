//! Public token amounts, as supplied to the transparent side of a shielded pool.
//!
//! Public amounts are arbitrary-precision decimal integers in the token
//! contract's own unit. They must be converted to the pool's internal unit
//! before they can be compared with shielded note values.

use std::{fmt, str::FromStr};

use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use super::{Amount, NonNegative};

/// The maximum bit length of a valid public amount.
///
/// Token contracts store balances as `uint256`.
pub const MAX_PUBLIC_AMOUNT_BITS: u64 = 256;

/// An arbitrary-precision public token amount.
///
/// Parsing accepts any signed decimal integer, so that range errors can be
/// reported separately from format errors. Use [`PublicAmount::check_range`]
/// before doing arithmetic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublicAmount(BigInt);

impl PublicAmount {
    /// Returns a zero public amount.
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    /// Returns `true` if this amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the number of bits needed to represent the magnitude of this amount.
    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    /// Returns the inner arbitrary-precision integer.
    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    /// Checks that this amount is non-negative and fits in
    /// [`MAX_PUBLIC_AMOUNT_BITS`] bits.
    pub fn check_range(&self) -> Result<(), PublicAmountError> {
        if self.0.is_negative() {
            return Err(PublicAmountError::Negative {
                value: self.to_string(),
            });
        }

        let bits = self.bits();
        if bits > MAX_PUBLIC_AMOUNT_BITS {
            return Err(PublicAmountError::TooLarge { bits });
        }

        Ok(())
    }

    /// Divides this amount by `divisor`, returning the quotient in the pool's
    /// internal unit.
    ///
    /// The division must be exact: any remainder is an error, so no value
    /// is ever truncated away. The quotient must also fit in an `i64`.
    pub fn div_exact(&self, divisor: &BigUint) -> Result<Amount<NonNegative>, PublicAmountError> {
        self.check_range()?;

        if divisor.is_zero() {
            return Err(PublicAmountError::DivideByZero);
        }

        let divisor = BigInt::from(divisor.clone());
        let remainder = &self.0 % &divisor;
        if !remainder.is_zero() {
            return Err(PublicAmountError::Remainder {
                value: self.to_string(),
                divisor: divisor.to_string(),
            });
        }

        let quotient = &self.0 / &divisor;
        let quotient = quotient
            .to_i64()
            .ok_or_else(|| PublicAmountError::QuotientOverflow {
                quotient: quotient.to_string(),
            })?;

        Amount::try_from(quotient).map_err(|_| PublicAmountError::QuotientOverflow {
            quotient: quotient.to_string(),
        })
    }
}

impl FromStr for PublicAmount {
    type Err = PublicAmountError;

    /// Parses a base-10 public amount.
    ///
    /// Surrounding whitespace is ignored, and an empty string is zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::zero());
        }

        let digits = trimmed
            .strip_prefix(|c: char| c == '-' || c == '+')
            .unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PublicAmountError::Malformed {
                text: trimmed.to_string(),
            });
        }

        trimmed
            .parse::<BigInt>()
            .map(Self)
            .map_err(|_| PublicAmountError::Malformed {
                text: trimmed.to_string(),
            })
    }
}

impl TryFrom<String> for PublicAmount {
    type Error = PublicAmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PublicAmount> for String {
    fn from(amount: PublicAmount) -> Self {
        amount.to_string()
    }
}

impl From<BigInt> for PublicAmount {
    fn from(value: BigInt) -> Self {
        Self(value)
    }
}

impl From<BigUint> for PublicAmount {
    fn from(value: BigUint) -> Self {
        Self(value.into())
    }
}

impl From<u64> for PublicAmount {
    fn from(value: u64) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for PublicAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Errors that can be returned when parsing or converting [`PublicAmount`]s.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PublicAmountError {
    /// The text is not a base-10 integer.
    #[error("public amount {text:?} is not a decimal integer")]
    Malformed {
        /// The rejected text, without surrounding whitespace.
        text: String,
    },

    /// The amount is below zero.
    #[error("public amount must be non-negative, got {value}")]
    Negative {
        /// The rejected value.
        value: String,
    },

    /// The amount needs more than [`MAX_PUBLIC_AMOUNT_BITS`] bits.
    #[error("public amount must be no more than 256 bits, got {bits} bits")]
    TooLarge {
        /// The bit length of the rejected value.
        bits: u64,
    },

    /// The divisor is zero.
    #[error("cannot divide a public amount by zero")]
    DivideByZero,

    /// The amount is not a multiple of the divisor.
    #[error("public amount {value} is not a multiple of {divisor}")]
    Remainder {
        /// The rejected value.
        value: String,
        /// The divisor.
        divisor: String,
    },

    /// The quotient does not fit in a signed 64-bit integer.
    #[error("scaled public amount {quotient} does not fit in an i64")]
    QuotientOverflow {
        /// The overflowing quotient.
        quotient: String,
    },
}
