//! Collects every transaction of a resolved block range.

use futures::{StreamExt, TryStreamExt, stream};

use crate::{BlockFetcher, BlockRange, SearchError};

/// Default number of block requests kept in flight while collecting.
pub const DEFAULT_CONCURRENCY: usize = 16;

/// Fetches the blocks of a [`BlockRange`] and flattens their transactions.
///
/// Blocks are requested concurrently, but the output always follows ascending block order and
/// preserves each block's own transaction order. A single failed fetch fails the whole collection.
#[derive(Debug, Clone, Copy)]
pub struct TransactionCollector {
    concurrency: usize,
}

impl Default for TransactionCollector {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY)
    }
}

impl TransactionCollector {
    /// Creates a new [`TransactionCollector`]. A concurrency of zero is treated as one.
    pub fn new(concurrency: usize) -> Self {
        Self { concurrency: concurrency.max(1) }
    }

    /// Returns the number of block requests kept in flight.
    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Collects the transactions of every block in `range`.
    pub async fn collect<F: BlockFetcher>(
        &self,
        range: BlockRange,
        fetcher: &F,
    ) -> Result<Vec<F::Transaction>, SearchError<F::Error>> {
        debug!(target: "batch_search", %range, concurrency = self.concurrency, "Collecting transactions");

        let blocks: Vec<Vec<F::Transaction>> = stream::iter(range)
            .map(|block| async move {
                fetcher.get_block(block).await.map_err(|source| SearchError::Fetch { block, source })
            })
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        let transactions: Vec<_> = blocks.into_iter().flatten().collect();
        info!(
            target: "batch_search",
            %range,
            blocks = range.len(),
            transactions = transactions.len(),
            "Collected transactions"
        );
        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MemoryBlocks;

    #[tokio::test]
    async fn test_collect_preserves_block_order() {
        let fetcher = MemoryBlocks::default()
            .with_block(10, vec!["a"])
            .with_block(11, vec![])
            .with_block(12, vec!["b", "c"]);

        let txs = TransactionCollector::default()
            .collect(BlockRange { start: 10, end: 12 }, &fetcher)
            .await
            .unwrap();
        assert_eq!(txs, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_collect_ordering_with_delays() {
        // Earlier blocks respond slower than later ones.
        let mut fetcher = MemoryBlocks::default();
        for block in 0..20u64 {
            fetcher = fetcher.with_delayed_block(
                block,
                vec![format!("{block}-0"), format!("{block}-1")],
                std::time::Duration::from_millis(20 - block),
            );
        }

        let txs = TransactionCollector::new(8)
            .collect(BlockRange { start: 0, end: 19 }, &fetcher)
            .await
            .unwrap();

        let expected: Vec<String> =
            (0..20u64).flat_map(|b| [format!("{b}-0"), format!("{b}-1")]).collect();
        assert_eq!(txs, expected);
    }

    #[tokio::test]
    async fn test_collect_fetches_each_block_once() {
        let fetcher =
            MemoryBlocks::default().with_block(5, vec![1]).with_block(6, vec![2]).with_block(7, vec![3]);

        let txs =
            TransactionCollector::new(1).collect(BlockRange { start: 5, end: 7 }, &fetcher).await.unwrap();
        assert_eq!(txs, vec![1, 2, 3]);
        assert_eq!(fetcher.requests(), vec![5, 6, 7]);
    }

    #[tokio::test]
    async fn test_collect_fails_on_missing_block() {
        let fetcher = MemoryBlocks::default().with_block(1, vec!["a"]).with_block(3, vec!["c"]);

        let err = TransactionCollector::default()
            .collect(BlockRange { start: 1, end: 3 }, &fetcher)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Fetch { block: 2, .. }));
    }

    #[test]
    fn test_zero_concurrency_is_clamped() {
        assert_eq!(TransactionCollector::new(0).concurrency(), 1);
    }
}
