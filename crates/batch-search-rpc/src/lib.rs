#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

mod contracts;
pub use contracts::{ISequencerInbox, NODE_INTERFACE_ADDRESS, NodeInterface};

mod error;
pub use error::RpcSourceError;

mod oracle;
pub use oracle::{AlloyBatchOracle, UNPOSTED_BATCH};

mod chain;
pub use chain::AlloyChainMeta;

mod blocks;
pub use blocks::AlloyBlockFetcher;

mod confirmations;
pub use confirmations::{AlloyConfirmationReader, BlockStatus};

#[cfg(test)]
pub(crate) mod test_utils;
