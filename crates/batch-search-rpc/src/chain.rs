//! Chain metadata read from the child and parent chains.

use alloy_primitives::Address;
use alloy_provider::Provider;
use arb_batch_search::ChainMeta;
use async_trait::async_trait;

use crate::{ISequencerInbox, RpcSourceError};

/// A [`ChainMeta`] reading the head from the child chain and the batch count from the parent
/// chain's `SequencerInbox`.
#[derive(Debug, Clone)]
pub struct AlloyChainMeta<C, L> {
    child: C,
    parent: L,
    sequencer_inbox: Address,
    genesis_block: u64,
}

impl<C: Provider, L: Provider> AlloyChainMeta<C, L> {
    /// Creates a new [`AlloyChainMeta`].
    ///
    /// `genesis_block` is the first child-chain block attributed to a batch, for instance the
    /// Nitro migration block on chains that predate Nitro.
    pub const fn new(child: C, parent: L, sequencer_inbox: Address, genesis_block: u64) -> Self {
        Self { child, parent, sequencer_inbox, genesis_block }
    }
}

#[async_trait]
impl<C: Provider, L: Provider> ChainMeta for AlloyChainMeta<C, L> {
    type Error = RpcSourceError;

    async fn genesis_block(&self) -> Result<u64, Self::Error> {
        Ok(self.genesis_block)
    }

    async fn latest_block(&self) -> Result<u64, Self::Error> {
        Ok(self.child.get_block_number().await?)
    }

    async fn latest_posted_batch(&self) -> Result<Option<u64>, Self::Error> {
        let inbox = ISequencerInbox::new(self.sequencer_inbox, &self.parent);
        let count = inbox.batchCount().call().await?;
        debug!(target: "batch_search::rpc", inbox = %self.sequencer_inbox, %count, "Read batch count");

        // Batches are numbered from zero, so the latest one is `count - 1`.
        Ok(count.saturating_to::<u64>().checked_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{U64, U256, address};
    use alloy_transport::mock::Asserter;
    use rstest::rstest;

    use super::*;
    use crate::test_utils::{mocked_provider, push_call_result};

    const INBOX: Address = address!("0x1c479675ad559DC151F6Ec7ed3FbF8ceE79582B6");

    #[rstest]
    #[case::none_posted(0, None)]
    #[case::only_genesis(1, Some(0))]
    #[case::many(912_345, Some(912_344))]
    #[tokio::test]
    async fn test_latest_posted_batch(#[case] count: u64, #[case] expected: Option<u64>) {
        let child = Asserter::new();
        let parent = Asserter::new();
        push_call_result(&parent, U256::from(count));

        let meta = AlloyChainMeta::new(mocked_provider(child), mocked_provider(parent), INBOX, 0);
        assert_eq!(meta.latest_posted_batch().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_latest_block_and_genesis() {
        let child = Asserter::new();
        child.push_success(&U64::from(250_000_123u64));

        let meta = AlloyChainMeta::new(
            mocked_provider(child),
            mocked_provider(Asserter::new()),
            INBOX,
            22_207_817,
        );
        assert_eq!(meta.genesis_block().await.unwrap(), 22_207_817);
        assert_eq!(meta.latest_block().await.unwrap(), 250_000_123);
    }
}
