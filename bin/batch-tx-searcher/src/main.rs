//! Arbitrum batch transaction searcher binary.

#[macro_use]
extern crate tracing;

mod cli;
mod commands;
mod config;

use std::{process::ExitCode, time::Duration};

use arb_cli_utils::LogConfig;
use clap::Parser;
use eyre::WrapErr;

use crate::{
    cli::{Cli, Commands},
    config::ChainConfig,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = LogConfig::from(cli.logging.clone()).init_tracing_subscriber() {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(target: "batch_tx_searcher", "{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> eyre::Result<()> {
    let config = ChainConfig::load(&cli.config)?.with_rpc_overrides(cli.child_rpc, cli.parent_rpc);
    info!(
        target: "batch_tx_searcher",
        chain = %config.name,
        child_rpc = %config.child_rpc,
        parent_rpc = %config.parent_rpc,
        "Loaded chain config"
    );

    let command = async {
        match cli.command {
            Commands::Batch(args) => commands::run_batch(args, &config).await,
            Commands::Block(args) => commands::run_block(args, &config).await,
        }
    };

    match cli.timeout {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), command)
            .await
            .wrap_err_with(|| format!("Command timed out after {secs}s"))?,
        None => command.await,
    }
}
