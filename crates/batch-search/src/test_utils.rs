//! Deterministic in-memory collaborators for testing the batch search.

use std::{
    collections::BTreeMap,
    sync::{
        Mutex,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;

use crate::{BatchOracle, BlockFetcher, ChainMeta};

/// The error returned by every test collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FakeError {
    /// The collaborator was configured to fail.
    #[error("injected failure")]
    Injected,
    /// The requested block is unknown.
    #[error("block {0} not found")]
    BlockNotFound(u64),
}

#[derive(Debug, Clone)]
enum Steps {
    /// Batch `n` covers `size` blocks starting at `genesis + n * size`.
    Uniform { size: u64 },
    /// Exclusive upper block of each batch, starting from batch 1.
    Ends(Vec<u64>),
}

/// A [`BatchOracle`] backed by a step function that counts every request.
#[derive(Debug)]
pub struct StepOracle {
    genesis: u64,
    latest: u64,
    steps: Steps,
    last_posted: Option<u64>,
    calls: AtomicU64,
}

impl StepOracle {
    /// Batches of `size` blocks over `[genesis, latest]`, numbered from zero at genesis.
    pub fn uniform(genesis: u64, latest: u64, size: u64) -> Self {
        assert!(size > 0 && genesis <= latest);
        Self {
            genesis,
            latest,
            steps: Steps::Uniform { size },
            last_posted: None,
            calls: AtomicU64::new(0),
        }
    }

    /// Consecutive batches numbered from one at genesis, each covering the given number of blocks.
    /// The chain head is the last block of the last batch.
    pub fn from_sizes(genesis: u64, sizes: &[u64]) -> Self {
        assert!(!sizes.is_empty() && sizes.iter().all(|size| *size > 0));
        let ends: Vec<u64> = sizes
            .iter()
            .scan(genesis, |next, size| {
                *next += size;
                Some(*next)
            })
            .collect();
        let latest = ends[ends.len() - 1] - 1;
        Self { genesis, latest, steps: Steps::Ends(ends), last_posted: None, calls: AtomicU64::new(0) }
    }

    /// Blocks after `block` report `u64::MAX`, as a node does for blocks no posted batch holds.
    pub fn with_posted_head(mut self, block: u64) -> Self {
        self.last_posted = Some(block);
        self
    }

    /// The lowest block of the chain.
    pub const fn genesis(&self) -> u64 {
        self.genesis
    }

    /// The chain head.
    pub const fn latest(&self) -> u64 {
        self.latest
    }

    /// The batch holding the chain head.
    pub fn last_batch(&self) -> u64 {
        self.lookup(self.latest)
    }

    /// Returns the batch of `block` without counting a request.
    pub fn lookup(&self, block: u64) -> u64 {
        if self.last_posted.is_some_and(|head| block > head) {
            return u64::MAX;
        }
        match &self.steps {
            Steps::Uniform { size } => block.saturating_sub(self.genesis) / size,
            Steps::Ends(ends) => {
                if block < self.genesis {
                    return 0;
                }
                ends.partition_point(|end| *end <= block) as u64 + 1
            }
        }
    }

    /// Number of [`BatchOracle::batch_of`] calls made so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Resets the request counter.
    pub fn reset_calls(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl BatchOracle for StepOracle {
    type Error = FakeError;

    async fn batch_of(&self, block: u64) -> Result<u64, Self::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.lookup(block))
    }
}

/// A [`BatchOracle`] that fails every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingOracle;

#[async_trait]
impl BatchOracle for FailingOracle {
    type Error = FakeError;

    async fn batch_of(&self, _block: u64) -> Result<u64, Self::Error> {
        Err(FakeError::Injected)
    }
}

/// Fixed [`ChainMeta`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryChain {
    genesis: u64,
    latest: u64,
    latest_posted: Option<u64>,
}

impl MemoryChain {
    /// Creates a new [`MemoryChain`].
    pub const fn new(genesis: u64, latest: u64, latest_posted: Option<u64>) -> Self {
        Self { genesis, latest, latest_posted }
    }
}

#[async_trait]
impl ChainMeta for MemoryChain {
    type Error = FakeError;

    async fn genesis_block(&self) -> Result<u64, Self::Error> {
        Ok(self.genesis)
    }

    async fn latest_block(&self) -> Result<u64, Self::Error> {
        Ok(self.latest)
    }

    async fn latest_posted_batch(&self) -> Result<Option<u64>, Self::Error> {
        Ok(self.latest_posted)
    }
}

/// A [`BlockFetcher`] serving blocks from memory, recording every request.
#[derive(Debug)]
pub struct MemoryBlocks<T> {
    blocks: BTreeMap<u64, (Vec<T>, Duration)>,
    requests: Mutex<Vec<u64>>,
}

impl<T> Default for MemoryBlocks<T> {
    fn default() -> Self {
        Self { blocks: BTreeMap::new(), requests: Mutex::new(Vec::new()) }
    }
}

impl<T> MemoryBlocks<T> {
    /// Adds a block with the given transactions.
    pub fn with_block(self, number: u64, transactions: Vec<T>) -> Self {
        self.with_delayed_block(number, transactions, Duration::ZERO)
    }

    /// Adds a block that is served only after `delay`.
    pub fn with_delayed_block(mut self, number: u64, transactions: Vec<T>, delay: Duration) -> Self {
        self.blocks.insert(number, (transactions, delay));
        self
    }

    /// Block numbers requested so far, in request order.
    pub fn requests(&self) -> Vec<u64> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> BlockFetcher for MemoryBlocks<T> {
    type Transaction = T;
    type Error = FakeError;

    async fn get_block(&self, block: u64) -> Result<Vec<T>, Self::Error> {
        self.requests.lock().unwrap().push(block);
        let (transactions, delay) =
            self.blocks.get(&block).cloned().ok_or(FakeError::BlockNotFound(block))?;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(transactions)
    }
}
