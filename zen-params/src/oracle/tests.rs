//! Tests for the scaling factor oracle.

use num_bigint::BigUint;

use zen_chain::address::{Address, ADDRESS_LEN};

use crate::{
    error::ParameterError,
    oracle::{method_selector, ScalingFactorOracle, SCALING_FACTOR_METHOD},
    query::Request,
    tests::util::{chain_query, factor_chunks, failing_chain_query},
};

#[test]
fn known_selectors() {
    let _init_guard = zen_test::init();

    // Well-known ERC-20 selectors.
    assert_eq!(hex::encode(method_selector("transfer(address,uint256)")), "a9059cbb");
    assert_eq!(hex::encode(method_selector("balanceOf(address)")), "70a08231");
}

#[tokio::test]
async fn queries_the_full_contract_address() -> color_eyre::Result<()> {
    let _init_guard = zen_test::init();

    let contract_address = Address::from([0x41; ADDRESS_LEN]);
    let (query, requests) = chain_query(factor_chunks(1_000));
    let oracle = ScalingFactorOracle::new(query, SCALING_FACTOR_METHOD);

    let factor = oracle.scaling_factor(contract_address).await?;
    assert_eq!(factor, BigUint::from(1_000u64));

    let requests = requests.lock().expect("unpoisoned");
    assert_eq!(
        *requests,
        vec![Request::TriggerConstantContract {
            contract_address,
            data: method_selector(SCALING_FACTOR_METHOD).to_vec(),
        }]
    );

    Ok(())
}

#[tokio::test]
async fn concatenates_result_chunks() -> color_eyre::Result<()> {
    let _init_guard = zen_test::init();

    let mut word = [0u8; 32];
    word[30] = 0x01;
    word[31] = 0x02;
    let chunks = vec![word[..7].to_vec(), Vec::new(), word[7..].to_vec()];

    let (query, _requests) = chain_query(chunks);
    let oracle = ScalingFactorOracle::new(query, SCALING_FACTOR_METHOD);

    let factor = oracle.scaling_factor(Address::from([0; ADDRESS_LEN])).await?;
    assert_eq!(factor, BigUint::from(0x0102u64));

    Ok(())
}

#[tokio::test]
async fn rejects_wrong_result_lengths() {
    let _init_guard = zen_test::init();

    for len in [0, 1, 31, 33, 64] {
        let (query, _requests) = chain_query(vec![vec![0x01; len]]);
        let oracle = ScalingFactorOracle::new(query, SCALING_FACTOR_METHOD);

        let result = oracle.scaling_factor(Address::from([0; ADDRESS_LEN])).await;
        assert!(
            matches!(result, Err(ParameterError::OracleProtocolError(_))),
            "unexpected result for a {len} byte response: {result:?}",
        );
    }
}

#[tokio::test]
async fn rejects_zero_scaling_factor() {
    let _init_guard = zen_test::init();

    let (query, _requests) = chain_query(vec![vec![0; 32]]);
    let oracle = ScalingFactorOracle::new(query, SCALING_FACTOR_METHOD);

    let result = oracle.scaling_factor(Address::from([0; ADDRESS_LEN])).await;
    assert!(matches!(result, Err(ParameterError::OracleProtocolError(_))));
}

#[tokio::test]
async fn propagates_query_failures() {
    let _init_guard = zen_test::init();

    let oracle = ScalingFactorOracle::new(failing_chain_query(), SCALING_FACTOR_METHOD);

    let result = oracle.scaling_factor(Address::from([0; ADDRESS_LEN])).await;
    assert!(matches!(result, Err(ParameterError::Oracle(_))));
}
