//! Error types for batch search.

/// A batch number that can never resolve to a block range.
///
/// Raised before any oracle request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Batch zero holds the chain's initialisation data, not child-chain blocks.
    #[error("batch number must be at least 1")]
    ZeroBatch,
    /// The sequencer has not posted any batch yet.
    #[error("no batches have been posted yet")]
    NoBatchesPosted,
    /// The batch is beyond the latest posted batch.
    #[error("batch {batch} has not been posted, latest posted batch is {latest}")]
    BatchNotPosted {
        /// The requested batch.
        batch: u64,
        /// The latest posted batch.
        latest: u64,
    },
}

/// An error raised while resolving or collecting a batch.
///
/// `E` is the error type of the remote collaborator. Remote failures are passed through unmodified
/// and never retried.
#[derive(Debug, thiserror::Error)]
pub enum SearchError<E> {
    /// The batch number failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The search domain is empty.
    #[error("invalid search domain: genesis block {genesis} is above latest block {latest}")]
    InvalidDomain {
        /// Lower bound of the domain.
        genesis: u64,
        /// Upper bound of the domain.
        latest: u64,
    },
    /// No block in the domain maps to the batch.
    #[error("batch {batch} not found in blocks [{genesis}, {latest}]")]
    BatchNotFound {
        /// The requested batch.
        batch: u64,
        /// Lower bound of the domain.
        genesis: u64,
        /// Upper bound of the domain.
        latest: u64,
    },
    /// A batch oracle or chain metadata request failed.
    #[error("oracle request failed: {0}")]
    Oracle(#[source] E),
    /// A block fetch failed.
    #[error("failed to fetch block {block}: {source}")]
    Fetch {
        /// The block being fetched.
        block: u64,
        /// The underlying error.
        #[source]
        source: E,
    },
}

impl<E> SearchError<E> {
    /// Returns `true` if the error came from a remote collaborator and the whole call may be
    /// retried.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Oracle(_) | Self::Fetch { .. })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("boom")]
    struct Boom;

    #[rstest]
    #[case::zero(ValidationError::ZeroBatch, "batch number must be at least 1")]
    #[case::none_posted(ValidationError::NoBatchesPosted, "no batches have been posted yet")]
    #[case::not_posted(
        ValidationError::BatchNotPosted { batch: 11, latest: 10 },
        "batch 11 has not been posted, latest posted batch is 10"
    )]
    fn test_validation_error_display(#[case] error: ValidationError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::validation(SearchError::Validation(ValidationError::ZeroBatch), false)]
    #[case::domain(SearchError::InvalidDomain { genesis: 2, latest: 1 }, false)]
    #[case::not_found(SearchError::BatchNotFound { batch: 1, genesis: 0, latest: 1 }, false)]
    #[case::oracle(SearchError::Oracle(Boom), true)]
    #[case::fetch(SearchError::Fetch { block: 7, source: Boom }, true)]
    fn test_is_transient(#[case] error: SearchError<Boom>, #[case] expected: bool) {
        assert_eq!(error.is_transient(), expected);
    }
}
