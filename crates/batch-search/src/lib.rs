#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

mod range;
pub use range::BlockRange;

mod traits;
pub use traits::{BatchOracle, BlockFetcher, ChainMeta};

mod errors;
pub use errors::{SearchError, ValidationError};

mod resolver;
pub use resolver::{BatchRangeResolver, DEFAULT_STRIDE};

mod collector;
pub use collector::{DEFAULT_CONCURRENCY, TransactionCollector};

mod searcher;
pub use searcher::{BatchSearcher, BatchTransactions, validate_batch};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
