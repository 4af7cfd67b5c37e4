//! Contains the CLI arguments for the batch-tx-searcher binary.

use std::path::PathBuf;

use arb_batch_search::{DEFAULT_CONCURRENCY, DEFAULT_STRIDE};
use arb_cli_utils::LogArgs;
use clap::{Args, Parser, Subcommand, ValueEnum};
use url::Url;

/// Finds the child-chain blocks and transactions posted in an Arbitrum sequencer batch.
#[derive(Debug, Parser)]
#[command(name = "batch-tx-searcher")]
#[command(about = "Find the blocks and transactions posted in an Arbitrum sequencer batch")]
pub(crate) struct Cli {
    /// Chain configuration (arb1, nova, sepolia, or path to config file)
    #[arg(
        short = 'c',
        long = "config",
        default_value = "arb1",
        env = "BATCH_SEARCH_CHAIN",
        global = true
    )]
    pub(crate) config: String,

    /// Child chain RPC endpoint, overriding the chain configuration
    #[arg(long = "child-rpc", env = "CHILD_RPC", global = true)]
    pub(crate) child_rpc: Option<Url>,

    /// Parent chain RPC endpoint, overriding the chain configuration
    #[arg(long = "parent-rpc", env = "PARENT_RPC", global = true)]
    pub(crate) parent_rpc: Option<Url>,

    /// Abort the command after this many seconds
    #[arg(long = "timeout", global = true)]
    pub(crate) timeout: Option<u64>,

    #[command(flatten)]
    pub(crate) logging: LogArgs,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

/// Subcommands for the batch-tx-searcher CLI.
#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Resolve a batch to its block range, or collect all of its transactions
    #[command(visible_alias = "b")]
    Batch(BatchArgs),
    /// Show which batch posted a block and how many parent chain confirmations it has
    Block(BlockArgs),
}

/// What to do with a resolved batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Action {
    /// Print the first and last block of the batch
    #[value(alias = "getBlockRange")]
    GetBlockRange,
    /// Write every transaction hash in the batch to the output file
    #[value(alias = "getAllTxns")]
    GetAllTxns,
}

/// Arguments of the `batch` subcommand.
#[derive(Debug, Clone, Args)]
pub(crate) struct BatchArgs {
    /// The batch number to search for
    #[arg(long = "batch", alias = "batchNum")]
    pub(crate) batch: u64,

    /// The action to perform
    #[arg(long = "action", value_enum, default_value = "get-block-range")]
    pub(crate) action: Action,

    /// Output file, required by get-all-txns
    #[arg(short = 'o', long = "output", alias = "outputFile")]
    pub(crate) output: Option<PathBuf>,

    /// Blocks skipped per probe while walking out to a batch edge
    #[arg(long = "stride", default_value_t = DEFAULT_STRIDE)]
    pub(crate) stride: u64,

    /// Block requests kept in flight while collecting transactions
    #[arg(long = "concurrency", default_value_t = DEFAULT_CONCURRENCY)]
    pub(crate) concurrency: usize,
}

/// Arguments of the `block` subcommand.
#[derive(Debug, Clone, Args)]
pub(crate) struct BlockArgs {
    /// The child chain block number
    #[arg(long = "block")]
    pub(crate) block: u64,

    /// Fail unless the block's batch has at least this many parent chain confirmations
    #[arg(long = "min-confirmations")]
    pub(crate) min_confirmations: Option<u64>,
}

/// A command line that parses but cannot be executed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum UsageError {
    /// `get-all-txns` writes its result to a file.
    #[error("--output is required for the get-all-txns action")]
    MissingOutput,
}

impl BatchArgs {
    /// Checks argument combinations clap cannot express.
    pub(crate) const fn validate(&self) -> Result<(), UsageError> {
        if matches!(self.action, Action::GetAllTxns) && self.output.is_none() {
            return Err(UsageError::MissingOutput);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("batch-tx-searcher").chain(args.iter().copied()))
            .unwrap()
    }

    fn batch_args(args: &[&str]) -> BatchArgs {
        match parse(args).command {
            Commands::Batch(args) => args,
            other => panic!("expected batch command, got {other:?}"),
        }
    }

    #[rstest]
    #[case::kebab("get-block-range", Action::GetBlockRange)]
    #[case::camel("getBlockRange", Action::GetBlockRange)]
    #[case::all_kebab("get-all-txns", Action::GetAllTxns)]
    #[case::all_camel("getAllTxns", Action::GetAllTxns)]
    fn test_action_parsing(#[case] action: &str, #[case] expected: Action) {
        let args = batch_args(&["batch", "--batch", "7", "--action", action, "-o", "out.json"]);
        assert_eq!(args.action, expected);
        assert_eq!(args.batch, 7);
    }

    #[test]
    fn test_batch_defaults() {
        let args = batch_args(&["batch", "--batch", "1"]);
        assert_eq!(args.action, Action::GetBlockRange);
        assert_eq!(args.stride, DEFAULT_STRIDE);
        assert_eq!(args.concurrency, DEFAULT_CONCURRENCY);
        assert!(args.output.is_none());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_all_txns_requires_output() {
        let args = batch_args(&["batch", "--batch", "1", "--action", "getAllTxns"]);
        assert_eq!(args.validate(), Err(UsageError::MissingOutput));

        let args =
            batch_args(&["batch", "--batch", "1", "--action", "getAllTxns", "-o", "txs.json"]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&[
            "batch",
            "--batch",
            "3",
            "-c",
            "sepolia",
            "--child-rpc",
            "http://localhost:8547",
            "--timeout",
            "30",
        ]);
        assert_eq!(cli.config, "sepolia");
        assert_eq!(cli.child_rpc.unwrap().as_str(), "http://localhost:8547/");
        assert_eq!(cli.timeout, Some(30));
    }

    #[test]
    fn test_block_command() {
        let cli = parse(&["block", "--block", "150000000", "--min-confirmations", "12"]);
        match cli.command {
            Commands::Block(args) => {
                assert_eq!(args.block, 150_000_000);
                assert_eq!(args.min_confirmations, Some(12));
            }
            other => panic!("expected block command, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_batch_is_rejected() {
        let result = Cli::try_parse_from(["batch-tx-searcher", "batch"]);
        assert!(result.is_err());
    }
}
