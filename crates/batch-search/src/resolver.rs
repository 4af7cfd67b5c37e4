//! Resolution of a batch number to the block range it was posted with.

use crate::{BatchOracle, BlockRange, SearchError};

/// Default number of blocks skipped per probe while walking out to a batch boundary.
pub const DEFAULT_STRIDE: u64 = 25;

/// Resolves a batch number to the inclusive [`BlockRange`] it covers.
///
/// The resolver performs a binary search for any block of the batch, then walks outward in
/// fixed strides until it leaves the batch on each side, and scans the last stride block by block
/// to find the exact edge. The cost is logarithmic in the size of the search domain plus a bounded
/// number of probes per edge, independent of how many blocks the batch holds.
#[derive(Debug, Clone)]
pub struct BatchRangeResolver<O> {
    oracle: O,
    stride: u64,
}

/// A block known or assumed to belong to the target batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Witness {
    pub(crate) block: u64,
    /// Whether the oracle already confirmed the block belongs to the batch.
    pub(crate) verified: bool,
}

impl<O: BatchOracle> BatchRangeResolver<O> {
    /// Creates a new [`BatchRangeResolver`] with the [`DEFAULT_STRIDE`].
    pub const fn new(oracle: O) -> Self {
        Self { oracle, stride: DEFAULT_STRIDE }
    }

    /// Sets the boundary walk stride. A stride of zero is treated as one.
    pub fn with_stride(mut self, stride: u64) -> Self {
        self.stride = stride.max(1);
        self
    }

    /// Returns the configured stride.
    pub const fn stride(&self) -> u64 {
        self.stride
    }

    /// Resolves `batch` to the range of blocks in `[genesis, latest]` that map to it.
    ///
    /// The caller is expected to have validated `batch` against the latest posted batch. If no
    /// block in the domain maps to `batch`, [`SearchError::BatchNotFound`] is returned.
    pub async fn resolve(
        &self,
        batch: u64,
        genesis: u64,
        latest: u64,
    ) -> Result<BlockRange, SearchError<O::Error>> {
        if genesis > latest {
            return Err(SearchError::InvalidDomain { genesis, latest });
        }

        let mut probes = Probes::new(&self.oracle);

        let witness = self.find_witness_with(&mut probes, batch, genesis, latest).await?;
        debug!(
            target: "batch_search",
            batch,
            witness = witness.block,
            verified = witness.verified,
            oracle_calls = probes.calls,
            "Found witness block"
        );

        if !witness.verified && probes.batch_of(witness.block).await? != batch {
            return Err(SearchError::BatchNotFound { batch, genesis, latest });
        }

        let start = self.lower_boundary(&mut probes, batch, witness.block, genesis).await?;
        let end = self.upper_boundary(&mut probes, batch, witness.block, latest).await?;
        let range = BlockRange { start, end };

        info!(
            target: "batch_search",
            batch,
            start,
            end,
            oracle_calls = probes.calls,
            "Resolved batch block range"
        );
        Ok(range)
    }

    /// Binary searches `[genesis, latest]` for a block that maps to `batch`.
    #[cfg(test)]
    pub(crate) async fn find_witness(
        &self,
        batch: u64,
        genesis: u64,
        latest: u64,
    ) -> Result<Witness, SearchError<O::Error>> {
        let mut probes = Probes::new(&self.oracle);
        self.find_witness_with(&mut probes, batch, genesis, latest).await
    }

    async fn find_witness_with(
        &self,
        probes: &mut Probes<'_, O>,
        batch: u64,
        genesis: u64,
        latest: u64,
    ) -> Result<Witness, SearchError<O::Error>> {
        let mut low = genesis;
        let mut high = latest;

        // Blocks below `low` map to earlier batches; blocks from `high` on map to later ones
        // unless `high` is still the chain head.
        while low < high {
            let mid = low + (high - low) / 2;
            let found = probes.batch_of(mid).await?;
            trace!(target: "batch_search", low, high, mid, found, "Probed midpoint");

            match found.cmp(&batch) {
                core::cmp::Ordering::Equal => return Ok(Witness { block: mid, verified: true }),
                core::cmp::Ordering::Greater => high = mid,
                core::cmp::Ordering::Less => low = mid + 1,
            }
        }

        Ok(Witness { block: high, verified: false })
    }

    /// Finds the first block of `batch`, given that `witness` belongs to it.
    async fn lower_boundary(
        &self,
        probes: &mut Probes<'_, O>,
        batch: u64,
        witness: u64,
        genesis: u64,
    ) -> Result<u64, SearchError<O::Error>> {
        let mut inside = witness;
        loop {
            if inside == genesis {
                return Ok(genesis);
            }

            let probe = inside.saturating_sub(self.stride).max(genesis);
            if probes.batch_of(probe).await? == batch {
                inside = probe;
                continue;
            }

            // The edge lies in (probe, inside].
            for block in probe + 1..inside {
                if probes.batch_of(block).await? == batch {
                    return Ok(block);
                }
            }
            return Ok(inside);
        }
    }

    /// Finds the last block of `batch`, given that `witness` belongs to it.
    async fn upper_boundary(
        &self,
        probes: &mut Probes<'_, O>,
        batch: u64,
        witness: u64,
        latest: u64,
    ) -> Result<u64, SearchError<O::Error>> {
        let mut inside = witness;
        loop {
            if inside == latest {
                return Ok(latest);
            }

            let probe = inside.saturating_add(self.stride).min(latest);
            if probes.batch_of(probe).await? == batch {
                inside = probe;
                continue;
            }

            // The edge lies in [inside, probe).
            for block in (inside + 1..probe).rev() {
                if probes.batch_of(block).await? == batch {
                    return Ok(block);
                }
            }
            return Ok(inside);
        }
    }
}

/// Counts oracle requests made during a single resolution.
#[derive(Debug)]
struct Probes<'a, O> {
    oracle: &'a O,
    calls: u64,
}

impl<'a, O: BatchOracle> Probes<'a, O> {
    const fn new(oracle: &'a O) -> Self {
        Self { oracle, calls: 0 }
    }

    async fn batch_of(&mut self, block: u64) -> Result<u64, SearchError<O::Error>> {
        self.calls += 1;
        self.oracle.batch_of(block).await.map_err(SearchError::Oracle)
    }
}
