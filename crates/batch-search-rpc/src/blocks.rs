//! Block transaction lookups.

use alloy_primitives::B256;
use alloy_provider::Provider;
use alloy_rpc_types_eth::BlockNumberOrTag;
use arb_batch_search::BlockFetcher;
use async_trait::async_trait;

use crate::RpcSourceError;

/// A [`BlockFetcher`] returning the transaction hashes of child-chain blocks.
///
/// Only hashes are requested. Full Arbitrum transactions include chain-specific envelope types
/// that a plain Ethereum decoder rejects.
#[derive(Debug, Clone)]
pub struct AlloyBlockFetcher<P> {
    provider: P,
}

impl<P: Provider> AlloyBlockFetcher<P> {
    /// Creates a new [`AlloyBlockFetcher`].
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P: Provider> BlockFetcher for AlloyBlockFetcher<P> {
    type Transaction = B256;
    type Error = RpcSourceError;

    async fn get_block(&self, block: u64) -> Result<Vec<B256>, Self::Error> {
        let response = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(block))
            .hashes()
            .await?
            .ok_or(RpcSourceError::BlockNotFound(block))?;

        let hashes: Vec<B256> = response.transactions.hashes().collect();
        trace!(target: "batch_search::rpc", block, transactions = hashes.len(), "Fetched block");
        Ok(hashes)
    }
}
