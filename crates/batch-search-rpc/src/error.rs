//! Errors raised by the RPC-backed collaborators.

use alloy_transport::TransportError;

/// An error for the alloy-backed batch search collaborators.
#[derive(Debug, thiserror::Error)]
pub enum RpcSourceError {
    /// The JSON-RPC request failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// A contract call failed or returned undecodable data.
    #[error(transparent)]
    Contract(#[from] alloy_contract::Error),
    /// The node does not know the block.
    #[error("block {0} not found")]
    BlockNotFound(u64),
}
