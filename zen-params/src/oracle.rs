//! Reads a shielded pool's scaling factor from its contract.

use num_bigint::BigUint;
use num_traits::Zero;
use sha3::{Digest, Keccak256};
use tower::{Service, ServiceExt};

use zen_chain::address::Address;

use crate::{
    error::ParameterError,
    query::{Request, Response},
    BoxError,
};

#[cfg(test)]
mod tests;

/// The signature of the contract method that returns the scaling factor.
pub const SCALING_FACTOR_METHOD: &str = "scalingFactor()";

/// The length of an ABI encoded `uint256`.
pub const UINT256_LEN: usize = 32;

/// Returns the ABI method selector for `signature`: the first four bytes of
/// its Keccak-256 hash.
pub fn method_selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());

    let mut selector = [0; 4];
    selector.copy_from_slice(&hash[..4]);
    selector
}

/// Queries shielded pool contracts for their scaling factor.
///
/// Scaling factors are fetched fresh for every request, and failed queries
/// are not retried.
#[derive(Clone, Debug)]
pub struct ScalingFactorOracle<Q> {
    /// The chain query service.
    query: Q,

    /// The selector of the scaling factor method.
    selector: [u8; 4],
}

impl<Q> ScalingFactorOracle<Q>
where
    Q: Service<Request, Response = Response, Error = BoxError> + Clone + Send + 'static,
    Q::Future: Send + 'static,
{
    /// Returns an oracle that calls `method` on pool contracts, using `query`.
    pub fn new(query: Q, method: &str) -> Self {
        Self {
            query,
            selector: method_selector(method),
        }
    }

    /// Returns the method selector used by this oracle.
    pub fn selector(&self) -> [u8; 4] {
        self.selector
    }

    /// Returns the scaling factor of the pool at `contract_address`.
    ///
    /// The result chunks are concatenated, and must be exactly one big-endian
    /// `uint256`. A zero scaling factor is also rejected, because every public
    /// amount is divided by it.
    pub async fn scaling_factor(
        &self,
        contract_address: Address,
    ) -> Result<BigUint, ParameterError> {
        let request = Request::TriggerConstantContract {
            contract_address,
            data: self.selector.to_vec(),
        };

        let Response::ConstantResult(chunks) = self
            .query
            .clone()
            .oneshot(request)
            .await
            .map_err(ParameterError::Oracle)?;

        let result = chunks.concat();
        if result.len() != UINT256_LEN {
            return Err(ParameterError::OracleProtocolError(format!(
                "expected a {UINT256_LEN} byte result, got {} bytes in {} chunks",
                result.len(),
                chunks.len(),
            )));
        }

        let factor = BigUint::from_bytes_be(&result);
        if factor.is_zero() {
            return Err(ParameterError::OracleProtocolError(
                "scaling factor is zero".to_string(),
            ));
        }

        tracing::trace!(%contract_address, %factor, "fetched scaling factor");

        Ok(factor)
    }
}
