//! Contract bindings used to query batch data.

use alloy_primitives::{Address, address};
use alloy_sol_types::sol;

/// Address of the `NodeInterface` precompile on every Arbitrum chain.
///
/// The contract only exists for `eth_call`; it has no code in state.
pub const NODE_INTERFACE_ADDRESS: Address = address!("0x00000000000000000000000000000000000000C8");

sol! {
    /// Read-only helpers the Arbitrum node answers on behalf of the chain.
    #[sol(rpc)]
    interface NodeInterface {
        /// Returns the sequencer batch that posted the given child-chain block.
        function findBatchContainingBlock(uint64 blockNum) external view returns (uint64 batch);

        /// Returns the number of parent-chain confirmations of the batch holding the block.
        function getL1Confirmations(bytes32 blockHash) external view returns (uint64 confirmations);
    }
}

sol! {
    /// The parent-chain contract batches are posted to.
    #[sol(rpc)]
    interface ISequencerInbox {
        /// Number of batches posted so far.
        function batchCount() external view returns (uint256);
    }
}
