//! Helpers for driving providers with canned JSON-RPC responses.

use alloy_primitives::Bytes;
use alloy_provider::{Provider, ProviderBuilder};
use alloy_sol_types::SolValue;
use alloy_transport::mock::Asserter;

/// Returns a provider answering requests from `asserter`, in push order.
pub(crate) fn mocked_provider(asserter: Asserter) -> impl Provider + Clone {
    ProviderBuilder::new().connect_mocked_client(asserter)
}

/// Queues an `eth_call` response returning `value`.
pub(crate) fn push_call_result<T: SolValue>(asserter: &Asserter, value: T) {
    asserter.push_success(&Bytes::from(value.abi_encode()));
}

/// Queues an `eth_getBlockByNumber` response for block `number` holding `transactions`, returning
/// the block hash.
pub(crate) fn push_block(
    asserter: &Asserter,
    number: u64,
    transactions: Vec<alloy_primitives::B256>,
) -> alloy_primitives::B256 {
    let header = alloy_rpc_types_eth::Header::new(alloy_consensus::Header {
        number,
        ..Default::default()
    });
    let hash = header.hash;

    let mut block = alloy_rpc_types_eth::Block::<alloy_rpc_types_eth::Transaction>::empty(header);
    block.transactions = alloy_rpc_types_eth::BlockTransactions::Hashes(transactions);
    asserter.push_success(&block);
    hash
}
