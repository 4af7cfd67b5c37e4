//! Batch lookups through the `NodeInterface` precompile.

use alloy_provider::Provider;
use arb_batch_search::BatchOracle;
use async_trait::async_trait;

use crate::{NODE_INTERFACE_ADDRESS, NodeInterface, RpcSourceError};

/// Batch number reported for blocks that no posted batch holds yet.
///
/// It orders above every real batch, so the oracle stays monotonic up to the chain head.
pub const UNPOSTED_BATCH: u64 = u64::MAX;

/// Revert reason of `findBatchContainingBlock` for blocks past the last posted batch.
const UNPOSTED_BLOCK_REASON: &str = "is after latest on-chain block";

/// Returns `true` if `err` is the node refusing a block that has not been posted yet.
fn is_unposted_block(err: &alloy_contract::Error) -> bool {
    matches!(
        err,
        alloy_contract::Error::TransportError(e)
            if e.as_error_resp().is_some_and(|resp| resp.message.contains(UNPOSTED_BLOCK_REASON))
    )
}

/// A [`BatchOracle`] that asks the child chain's node which batch posted a block.
#[derive(Debug, Clone)]
pub struct AlloyBatchOracle<P> {
    provider: P,
}

impl<P: Provider> AlloyBatchOracle<P> {
    /// Creates a new [`AlloyBatchOracle`] over a child-chain provider.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Returns the batch that posted `block`, or `None` if the block is not posted yet.
    pub async fn posted_batch_of(&self, block: u64) -> Result<Option<u64>, RpcSourceError> {
        let node = NodeInterface::new(NODE_INTERFACE_ADDRESS, &self.provider);
        match node.findBatchContainingBlock(block).call().await {
            Ok(batch) => {
                trace!(target: "batch_search::rpc", block, batch, "findBatchContainingBlock");
                Ok(Some(batch))
            }
            Err(err) if is_unposted_block(&err) => {
                trace!(target: "batch_search::rpc", block, "Block not posted yet");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl<P: Provider> BatchOracle for AlloyBatchOracle<P> {
    type Error = RpcSourceError;

    async fn batch_of(&self, block: u64) -> Result<u64, Self::Error> {
        Ok(self.posted_batch_of(block).await?.unwrap_or(UNPOSTED_BATCH))
    }
}
