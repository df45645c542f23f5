//! Converts public token amounts into the shielded pool's internal unit.
//!
//! Public amounts are divided by the pool's scaling factor. The division
//! must be exact: a remainder is always rejected, so scaling never loses
//! value.

use num_bigint::BigUint;
use tower::Service;

use zen_chain::{
    address::Address,
    amount::{Amount, NonNegative, PublicAmount},
};

use crate::{
    error::ParameterError,
    oracle::ScalingFactorOracle,
    query::{Request, Response},
    BoxError,
};


/// Parses a public amount.
///
/// Surrounding whitespace is ignored, and an empty string is zero.
pub fn parse_amount(text: &str) -> Result<PublicAmount, ParameterError> {
    Ok(text.parse()?)
}

/// Checks that `amount` is non-negative and no more than 256 bits.
pub fn check_range(amount: &PublicAmount) -> Result<(), ParameterError> {
    Ok(amount.check_range()?)
}

/// The public amounts of a request, in the pool's internal unit.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ScaledAmounts {
    /// The transparent amount being deposited into the pool.
    pub from: Amount<NonNegative>,
    /// The transparent amount being withdrawn from the pool.
    pub to: Amount<NonNegative>,
}

/// Divides `from` and `to` by the scaling factor of the pool at `address`.
///
/// Both amounts are range checked before the oracle is queried.
pub async fn scale<Q>(
    oracle: &ScalingFactorOracle<Q>,
    address: Address,
    from: &PublicAmount,
    to: &PublicAmount,
) -> Result<ScaledAmounts, ParameterError>
where
    Q: Service<Request, Response = Response, Error = BoxError> + Clone + Send + 'static,
    Q::Future: Send + 'static,
{
    check_range(from)?;
    check_range(to)?;

    let factor = oracle.scaling_factor(address).await?;

    scale_by(from, to, &factor)
}

/// Divides `from` and `to` by `factor`, which must be non-zero.
pub fn scale_by(
    from: &PublicAmount,
    to: &PublicAmount,
    factor: &BigUint,
) -> Result<ScaledAmounts, ParameterError> {
    Ok(ScaledAmounts {
        from: from.div_exact(factor)?,
        to: to.div_exact(factor)?,
    })
}
