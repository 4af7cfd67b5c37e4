//! Subcommand implementations.

use std::path::Path;

use alloy_primitives::B256;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use arb_batch_search::{BatchRangeResolver, BatchSearcher, BlockRange, TransactionCollector};
use arb_batch_search_rpc::{
    AlloyBatchOracle, AlloyBlockFetcher, AlloyChainMeta, AlloyConfirmationReader, BlockStatus,
};
use eyre::{Result, WrapErr};
use serde::Serialize;
use url::Url;

use crate::{
    cli::{Action, BatchArgs, BlockArgs, UsageError},
    config::ChainConfig,
};

/// Contents of the output file.
#[derive(Debug, Serialize)]
pub(crate) struct BatchReport<'a> {
    pub(crate) batch: u64,
    pub(crate) range: BlockRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) transactions: Option<&'a [B256]>,
}

fn connect(url: &Url) -> DynProvider {
    ProviderBuilder::new().connect_http(url.clone()).erased()
}

/// Runs the `batch` subcommand.
pub(crate) async fn run_batch(args: BatchArgs, config: &ChainConfig) -> Result<()> {
    // Usage problems must surface before any request is made.
    args.validate()?;

    let child = connect(&config.child_rpc);
    let parent = connect(&config.parent_rpc);

    let meta =
        AlloyChainMeta::new(child.clone(), parent, config.sequencer_inbox, config.genesis_block);
    let resolver =
        BatchRangeResolver::new(AlloyBatchOracle::new(child.clone())).with_stride(args.stride);
    let searcher = BatchSearcher::new(meta, resolver)
        .with_collector(TransactionCollector::new(args.concurrency));
    debug!(
        target: "batch_tx_searcher",
        batch = args.batch,
        stride = searcher.resolver().stride(),
        concurrency = args.concurrency,
        "Searching batch"
    );

    match args.action {
        Action::GetBlockRange => {
            let range = searcher
                .block_range(args.batch)
                .await
                .wrap_err_with(|| format!("Failed to resolve batch {}", args.batch))?;
            println!("Batch {} covers blocks {} to {}", args.batch, range.start, range.end);

            if let Some(output) = &args.output {
                write_report(output, &BatchReport { batch: args.batch, range, transactions: None })?;
            }
        }
        Action::GetAllTxns => {
            let output = args.output.as_deref().ok_or(UsageError::MissingOutput)?;
            let found = searcher
                .transactions(args.batch, &AlloyBlockFetcher::new(child))
                .await
                .wrap_err_with(|| format!("Failed to collect transactions of batch {}", args.batch))?;

            println!(
                "Batch {} covers blocks {} to {} with {} transactions",
                found.batch,
                found.range.start,
                found.range.end,
                found.transactions.len()
            );
            write_report(
                output,
                &BatchReport {
                    batch: found.batch,
                    range: found.range,
                    transactions: Some(&found.transactions),
                },
            )?;
        }
    }

    Ok(())
}

/// Runs the `block` subcommand.
pub(crate) async fn run_block(args: BlockArgs, config: &ChainConfig) -> Result<()> {
    let reader = AlloyConfirmationReader::new(connect(&config.child_rpc));
    let status = reader
        .status(args.block)
        .await
        .wrap_err_with(|| format!("Failed to read the status of block {}", args.block))?;

    println!("{}", serde_json::to_string_pretty(&status)?);
    check_confirmations(&status, args.min_confirmations)
}

/// Fails if `status` has fewer than `min_confirmations` parent chain confirmations.
pub(crate) fn check_confirmations(
    status: &BlockStatus,
    min_confirmations: Option<u64>,
) -> Result<()> {
    let Some(depth) = min_confirmations else {
        return Ok(());
    };
    match status.batch {
        None => eyre::bail!("block {} is not posted in any batch yet", status.block),
        Some(batch) if !status.is_confirmed(depth) => eyre::bail!(
            "batch {batch} holding block {} has {} confirmations, expected at least {depth}",
            status.block,
            status.l1_confirmations
        ),
        Some(_) => Ok(()),
    }
}

/// Writes `report` to `path` as pretty-printed JSON.
pub(crate) fn write_report(path: &Path, report: &BatchReport<'_>) -> Result<()> {
    let json = serde_json::to_vec_pretty(report)?;
    std::fs::write(path, json)
        .wrap_err_with(|| format!("Failed to write output file: {}", path.display()))?;
    info!(target: "batch_tx_searcher", path = %path.display(), "Wrote output file");
    Ok(())
}
