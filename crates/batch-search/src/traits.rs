//! Remote collaborators consumed by the search.

use async_trait::async_trait;

/// Maps a child-chain block to the sequencer batch that posted it.
///
/// Implementations must be monotonic: `batch_of` never decreases as the block number grows.
/// Each call is assumed to cost one network round-trip.
#[async_trait]
pub trait BatchOracle: Send + Sync {
    /// The error type for the [`BatchOracle`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the batch number containing `block`.
    async fn batch_of(&self, block: u64) -> Result<u64, Self::Error>;
}

/// Static and live metadata about the child chain.
#[async_trait]
pub trait ChainMeta: Send + Sync {
    /// The error type for the [`ChainMeta`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Lowest block number ever attributed to a batch.
    async fn genesis_block(&self) -> Result<u64, Self::Error>;

    /// The current chain head.
    async fn latest_block(&self) -> Result<u64, Self::Error>;

    /// Highest batch number posted so far, or `None` if nothing has been posted.
    async fn latest_posted_batch(&self) -> Result<Option<u64>, Self::Error>;
}

/// Fetches the transactions of a single block.
#[async_trait]
pub trait BlockFetcher: Send + Sync {
    /// A transaction as returned by the fetcher, usually a hash or a full body.
    type Transaction: Send;
    /// The error type for the [`BlockFetcher`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the transactions of `block` in their in-block order.
    async fn get_block(&self, block: u64) -> Result<Vec<Self::Transaction>, Self::Error>;
}

#[async_trait]
impl<T: BatchOracle + ?Sized> BatchOracle for &T {
    type Error = T::Error;

    async fn batch_of(&self, block: u64) -> Result<u64, Self::Error> {
        (**self).batch_of(block).await
    }
}

#[async_trait]
impl<T: BatchOracle + ?Sized> BatchOracle for std::sync::Arc<T> {
    type Error = T::Error;

    async fn batch_of(&self, block: u64) -> Result<u64, Self::Error> {
        (**self).batch_of(block).await
    }
}
