//! Chain configuration.

use std::path::{Path, PathBuf};

use alloy_primitives::{Address, address};
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use url::Url;

/// Endpoints and constants needed to search a chain's batches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ChainConfig {
    pub(crate) name: String,
    /// Child (rollup) chain RPC.
    pub(crate) child_rpc: Url,
    /// Parent (settlement) chain RPC.
    pub(crate) parent_rpc: Url,
    /// `SequencerInbox` contract on the parent chain.
    pub(crate) sequencer_inbox: Address,
    /// First child-chain block attributed to a batch.
    #[serde(default)]
    pub(crate) genesis_block: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ChainConfigOverride {
    name: Option<String>,
    child_rpc: Option<Url>,
    parent_rpc: Option<Url>,
    sequencer_inbox: Option<Address>,
    genesis_block: Option<u64>,
}

impl ChainConfig {
    pub(crate) fn arb1() -> Self {
        Self {
            name: "arb1".to_string(),
            child_rpc: Url::parse("https://arb1.arbitrum.io/rpc").unwrap(),
            parent_rpc: Url::parse("https://ethereum-rpc.publicnode.com").unwrap(),
            sequencer_inbox: address!("0x1c479675ad559DC151F6Ec7ed3FbF8ceE79582B6"),
            // Arbitrum One migrated to Nitro at this block; older blocks have no batch.
            genesis_block: 22_207_817,
        }
    }

    pub(crate) fn nova() -> Self {
        Self {
            name: "nova".to_string(),
            child_rpc: Url::parse("https://nova.arbitrum.io/rpc").unwrap(),
            parent_rpc: Url::parse("https://ethereum-rpc.publicnode.com").unwrap(),
            sequencer_inbox: address!("0x211E1c4c7f1bF5351Ac850Ed10FD68CFfCF6c21b"),
            genesis_block: 0,
        }
    }

    pub(crate) fn sepolia() -> Self {
        Self {
            name: "sepolia".to_string(),
            child_rpc: Url::parse("https://sepolia-rollup.arbitrum.io/rpc").unwrap(),
            parent_rpc: Url::parse("https://ethereum-sepolia-rpc.publicnode.com").unwrap(),
            sequencer_inbox: address!("0x6c97864CE4bEf387dE0b3310A44230f7E3F1be0D"),
            genesis_block: 0,
        }
    }

    fn builtin(name: &str) -> Option<Self> {
        match name {
            "arb1" | "mainnet" => Some(Self::arb1()),
            "nova" => Some(Self::nova()),
            "sepolia" => Some(Self::sepolia()),
            _ => None,
        }
    }

    /// Load config by name or path
    ///
    /// Resolution order:
    /// 1. Built-in config as base (arb1, nova or sepolia)
    /// 2. User config at ~/.arbitrum/config/<name>.yaml merged on top
    /// 3. Or treat as standalone file path
    pub(crate) fn load(name_or_path: &str) -> Result<Self> {
        Self::load_with_dir(name_or_path, Self::config_dir().as_deref())
    }

    fn load_with_dir(name_or_path: &str, config_dir: Option<&Path>) -> Result<Self> {
        let base_config = Self::builtin(name_or_path);

        if let Some(config_dir) = config_dir {
            let user_config_path = config_dir.join(format!("{name_or_path}.yaml"));
            if user_config_path.exists() {
                return base_config.map_or_else(
                    || Self::load_from_file(&user_config_path),
                    |base| Self::load_and_merge(&user_config_path, base),
                );
            }
        }

        if let Some(config) = base_config {
            return Ok(config);
        }

        let path = PathBuf::from(name_or_path);
        if path.exists() {
            return Self::load_from_file(&path);
        }

        eyre::bail!(
            "Config '{name_or_path}' not found. Expected built-in name (arb1, nova, sepolia), \
             user config at ~/.arbitrum/config/{name_or_path}.yaml, or a valid file path."
        )
    }

    /// Replaces the RPC endpoints with the ones given on the command line.
    pub(crate) fn with_rpc_overrides(mut self, child: Option<Url>, parent: Option<Url>) -> Self {
        if let Some(child) = child {
            self.child_rpc = child;
        }
        if let Some(parent) = parent {
            self.parent_rpc = parent;
        }
        self
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        serde_yaml::from_str(&contents)
            .wrap_err_with(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn load_and_merge(path: &Path, base: Self) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let overrides: ChainConfigOverride = serde_yaml::from_str(&contents)
            .wrap_err_with(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(Self {
            name: overrides.name.unwrap_or(base.name),
            child_rpc: overrides.child_rpc.unwrap_or(base.child_rpc),
            parent_rpc: overrides.parent_rpc.unwrap_or(base.parent_rpc),
            sequencer_inbox: overrides.sequencer_inbox.unwrap_or(base.sequencer_inbox),
            genesis_block: overrides.genesis_block.unwrap_or(base.genesis_block),
        })
    }

    fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".arbitrum").join("config"))
    }
}
