//! Where a child-chain block stands on the parent chain.

use alloy_primitives::B256;
use alloy_provider::Provider;
use alloy_rpc_types_eth::BlockNumberOrTag;
use serde::Serialize;

use crate::{AlloyBatchOracle, NODE_INTERFACE_ADDRESS, NodeInterface, RpcSourceError};

/// The posting status of a child-chain block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStatus {
    /// The child-chain block number.
    pub block: u64,
    /// The block hash.
    pub hash: B256,
    /// The batch that posted the block, `None` while no posted batch holds it.
    pub batch: Option<u64>,
    /// Parent-chain confirmations of that batch. Zero until the batch lands on the parent chain.
    pub l1_confirmations: u64,
}

impl BlockStatus {
    /// Returns `true` once the batch holding the block has at least `depth` confirmations.
    pub const fn is_confirmed(&self, depth: u64) -> bool {
        self.l1_confirmations >= depth
    }
}

/// Reads [`BlockStatus`] through the child chain's `NodeInterface`.
#[derive(Debug, Clone)]
pub struct AlloyConfirmationReader<P> {
    provider: P,
}

impl<P: Provider + Clone> AlloyConfirmationReader<P> {
    /// Creates a new [`AlloyConfirmationReader`].
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Returns the batch and parent-chain confirmations of `block`.
    pub async fn status(&self, block: u64) -> Result<BlockStatus, RpcSourceError> {
        let hash = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(block))
            .hashes()
            .await?
            .ok_or(RpcSourceError::BlockNotFound(block))?
            .header
            .hash;

        let batch = AlloyBatchOracle::new(self.provider.clone()).posted_batch_of(block).await?;

        let l1_confirmations = if batch.is_some() {
            let node = NodeInterface::new(NODE_INTERFACE_ADDRESS, &self.provider);
            node.getL1Confirmations(hash).call().await?
        } else {
            0
        };
        debug!(
            target: "batch_search::rpc",
            block, %hash, ?batch, l1_confirmations, "Read block status"
        );

        Ok(BlockStatus { block, hash, batch, l1_confirmations })
    }
}

#[cfg(test)]
mod tests {
    use alloy_transport::mock::Asserter;
    use rstest::rstest;

    use super::*;
    use crate::test_utils::{mocked_provider, push_block, push_call_result};

    #[tokio::test]
    async fn test_status() {
        let asserter = Asserter::new();
        let hash = push_block(&asserter, 1_000, vec![]);
        push_call_result(&asserter, 17u64);
        push_call_result(&asserter, 64u64);

        let reader = AlloyConfirmationReader::new(mocked_provider(asserter));
        let status = reader.status(1_000).await.unwrap();
        assert_eq!(status, BlockStatus { block: 1_000, hash, batch: Some(17), l1_confirmations: 64 });
    }

    #[tokio::test]
    async fn test_status_unposted_block() {
        let asserter = Asserter::new();
        let hash = push_block(&asserter, 1_000, vec![]);
        asserter.push_failure_msg(
            "requested block 1000 is after latest on-chain block 999 published in batch 9",
        );

        let reader = AlloyConfirmationReader::new(mocked_provider(asserter));
        let status = reader.status(1_000).await.unwrap();
        assert_eq!(status, BlockStatus { block: 1_000, hash, batch: None, l1_confirmations: 0 });
        assert!(!status.is_confirmed(1));
    }

    #[tokio::test]
    async fn test_status_unknown_block() {
        let asserter = Asserter::new();
        asserter.push_success(&serde_json::Value::Null);

        let reader = AlloyConfirmationReader::new(mocked_provider(asserter));
        assert!(matches!(reader.status(5).await, Err(RpcSourceError::BlockNotFound(5))));
    }

    #[rstest]
    #[case::pending(0, 1, false)]
    #[case::shallow(3, 6, false)]
    #[case::exact(6, 6, true)]
    #[case::deep(100, 6, true)]
    fn test_is_confirmed(#[case] confirmations: u64, #[case] depth: u64, #[case] expected: bool) {
        let status =
            BlockStatus {
            block: 1,
            hash: B256::ZERO,
            batch: Some(1),
            l1_confirmations: confirmations,
        };
        assert_eq!(status.is_confirmed(depth), expected);
    }

    #[test]
    fn test_json_shape() {
        let status = BlockStatus { block: 1, hash: B256::ZERO, batch: Some(2), l1_confirmations: 3 };
        let json = serde_json::to_value(status).unwrap();
        assert_eq!(json["l1Confirmations"], 3);
        assert_eq!(json["batch"], 2);
    }
}
