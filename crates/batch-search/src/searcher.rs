//! Validated batch lookups against live chain metadata.

use crate::{
    BatchOracle, BatchRangeResolver, BlockFetcher, BlockRange, ChainMeta, SearchError,
    TransactionCollector, ValidationError,
};

/// Checks that `batch` can be resolved given the latest posted batch.
pub const fn validate_batch(batch: u64, latest_posted: Option<u64>) -> Result<(), ValidationError> {
    if batch == 0 {
        return Err(ValidationError::ZeroBatch);
    }
    match latest_posted {
        None => Err(ValidationError::NoBatchesPosted),
        Some(latest) if batch > latest => Err(ValidationError::BatchNotPosted { batch, latest }),
        Some(_) => Ok(()),
    }
}

/// The transactions posted in a batch, along with the blocks they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchTransactions<T> {
    /// The batch number.
    pub batch: u64,
    /// The blocks the batch covers.
    pub range: BlockRange,
    /// Every transaction in `range`, in block order.
    pub transactions: Vec<T>,
}

/// Resolves batches against a chain, validating the batch number before searching.
#[derive(Debug, Clone)]
pub struct BatchSearcher<M, O> {
    meta: M,
    resolver: BatchRangeResolver<O>,
    collector: TransactionCollector,
}

impl<M, O> BatchSearcher<M, O>
where
    M: ChainMeta,
    O: BatchOracle<Error = M::Error>,
{
    /// Creates a new [`BatchSearcher`] with a default [`TransactionCollector`].
    pub fn new(meta: M, resolver: BatchRangeResolver<O>) -> Self {
        Self { meta, resolver, collector: TransactionCollector::default() }
    }

    /// Replaces the [`TransactionCollector`].
    pub fn with_collector(mut self, collector: TransactionCollector) -> Self {
        self.collector = collector;
        self
    }

    /// Returns the underlying resolver.
    pub const fn resolver(&self) -> &BatchRangeResolver<O> {
        &self.resolver
    }

    /// Resolves `batch` to the blocks it covers.
    ///
    /// Fails with [`SearchError::Validation`] before touching the oracle if `batch` is zero or has
    /// not been posted yet.
    pub async fn block_range(&self, batch: u64) -> Result<BlockRange, SearchError<M::Error>> {
        let latest_posted = self.meta.latest_posted_batch().await.map_err(SearchError::Oracle)?;
        validate_batch(batch, latest_posted)?;

        let genesis = self.meta.genesis_block().await.map_err(SearchError::Oracle)?;
        let latest = self.meta.latest_block().await.map_err(SearchError::Oracle)?;
        debug!(target: "batch_search", batch, genesis, latest, ?latest_posted, "Searching for batch");

        self.resolver.resolve(batch, genesis, latest).await
    }

    /// Resolves `batch` and collects every transaction it covers.
    pub async fn transactions<F>(
        &self,
        batch: u64,
        fetcher: &F,
    ) -> Result<BatchTransactions<F::Transaction>, SearchError<M::Error>>
    where
        F: BlockFetcher<Error = M::Error>,
    {
        let range = self.block_range(batch).await?;
        let transactions = self.collector.collect(range, fetcher).await?;
        Ok(BatchTransactions { batch, range, transactions })
    }
}
