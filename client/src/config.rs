//! Process-wide configuration: which program to talk to and how.
//!
//! A [`BindingsConfig`] is built once at startup, from the environment or a JSON file, and then
//! passed by reference to everything that needs a program id or an RPC client. It's never mutated
//! after it's loaded.

use std::{
    path::Path,
    str::FromStr,
};

use anyhow::Context;
use serde::Deserialize;
use solana_address::Address;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::{
    CommitmentConfig,
    CommitmentLevel,
};

pub const DEFAULT_RPC_URL: &str = "http://localhost:8899";

pub const PROGRAM_ID_ENV: &str = "RECORD_PROGRAM_ID";
pub const DEVNET_PROGRAM_ID_ENV: &str = "RECORD_PROGRAM_ID_DEVNET";
pub const CLUSTER_ENV: &str = "CLUSTER";
pub const RPC_URL_ENV: &str = "RPC_URL";
pub const COMMITMENT_ENV: &str = "COMMITMENT";
pub const SKIP_PREFLIGHT_ENV: &str = "SKIP_PREFLIGHT";

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[derive(strum_macros::Display, strum_macros::EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Cluster {
    Mainnet,
    Devnet,
    #[default]
    Localnet,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[derive(strum_macros::Display, strum_macros::EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn level(self) -> CommitmentLevel {
        match self {
            Commitment::Processed => CommitmentLevel::Processed,
            Commitment::Confirmed => CommitmentLevel::Confirmed,
            Commitment::Finalized => CommitmentLevel::Finalized,
        }
    }

    pub fn config(self) -> CommitmentConfig {
        CommitmentConfig {
            commitment: self.level(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BindingsConfig {
    /// The mainnet (or localnet) program id.
    pub program_id: Address,
    /// The devnet program id. Devnet might not have the latest version deployed.
    pub devnet_program_id: Option<Address>,
    pub cluster: Cluster,
    pub rpc_url: String,
    pub commitment: Commitment,
    pub skip_preflight: bool,
}

/// The on-disk shape of a [`BindingsConfig`]. Addresses are base58 strings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    program_id: String,
    devnet_program_id: Option<String>,
    #[serde(default)]
    cluster: Cluster,
    rpc_url: Option<String>,
    #[serde(default)]
    commitment: Commitment,
    #[serde(default)]
    skip_preflight: bool,
}

impl BindingsConfig {
    pub fn new(program_id: Address) -> Self {
        Self {
            program_id,
            devnet_program_id: None,
            cluster: Cluster::default(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            commitment: Commitment::default(),
            skip_preflight: false,
        }
    }

    /// The program id for the configured cluster. Falls back to [`BindingsConfig::program_id`] on
    /// devnet when no devnet id is configured.
    pub fn active_program_id(&self) -> &Address {
        match (self.cluster, &self.devnet_program_id) {
            (Cluster::Devnet, Some(devnet)) => devnet,
            _ => &self.program_id,
        }
    }

    pub fn rpc_client(&self) -> RpcClient {
        RpcClient::new_with_commitment(self.rpc_url.clone(), self.commitment.config())
    }

    /// Loads the config from environment variables. Only the program id is required.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Couldn't read config file {}", path.display()))?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let file: ConfigFile = serde_json::from_str(json).context("Invalid config file")?;
        Ok(Self {
            program_id: parse_address(&file.program_id)?,
            devnet_program_id: file
                .devnet_program_id
                .as_deref()
                .map(parse_address)
                .transpose()?,
            cluster: file.cluster,
            rpc_url: file.rpc_url.unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            commitment: file.commitment,
            skip_preflight: file.skip_preflight,
        })
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let program_id = var(PROGRAM_ID_ENV)
            .with_context(|| format!("{PROGRAM_ID_ENV} must be set"))
            .and_then(|s| parse_address(&s))?;

        let mut config = Self::new(program_id);
        if let Some(devnet) = var(DEVNET_PROGRAM_ID_ENV) {
            config.devnet_program_id = Some(parse_address(&devnet)?);
        }
        if let Some(cluster) = var(CLUSTER_ENV) {
            config.cluster = Cluster::from_str(&cluster)
                .with_context(|| format!("Invalid {CLUSTER_ENV}: {cluster}"))?;
        }
        if let Some(rpc_url) = var(RPC_URL_ENV) {
            config.rpc_url = rpc_url;
        }
        if let Some(commitment) = var(COMMITMENT_ENV) {
            config.commitment = Commitment::from_str(&commitment)
                .with_context(|| format!("Invalid {COMMITMENT_ENV}: {commitment}"))?;
        }
        if let Some(skip) = var(SKIP_PREFLIGHT_ENV) {
            config.skip_preflight = bool::from_str(&skip)
                .with_context(|| format!("Invalid {SKIP_PREFLIGHT_ENV}: {skip}"))?;
        }

        Ok(config)
    }
}

pub fn parse_address(s: &str) -> anyhow::Result<Address> {
    Address::from_str(s).with_context(|| format!("Invalid address: {s}"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const PROGRAM: &str = "11111111111111111111111111111112";
    const DEVNET: &str = "11111111111111111111111111111113";

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn env_defaults() {
        let config = BindingsConfig::from_lookup(env(&[(PROGRAM_ID_ENV, PROGRAM)])).unwrap();
        assert_eq!(config.program_id, parse_address(PROGRAM).unwrap());
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(config.cluster, Cluster::Localnet);
        assert_eq!(config.commitment, Commitment::Confirmed);
        assert!(!config.skip_preflight);
    }

    #[test]
    fn env_requires_program_id() {
        assert!(BindingsConfig::from_lookup(env(&[])).is_err());
        assert!(BindingsConfig::from_lookup(env(&[(PROGRAM_ID_ENV, "not base58!")])).is_err());
    }

    #[test]
    fn env_overrides() {
        let config = BindingsConfig::from_lookup(env(&[
            (PROGRAM_ID_ENV, PROGRAM),
            (DEVNET_PROGRAM_ID_ENV, DEVNET),
            (CLUSTER_ENV, "devnet"),
            (COMMITMENT_ENV, "finalized"),
            (SKIP_PREFLIGHT_ENV, "true"),
            (RPC_URL_ENV, "https://api.devnet.solana.com"),
        ]))
        .unwrap();
        assert_eq!(config.active_program_id(), &parse_address(DEVNET).unwrap());
        assert_eq!(config.commitment.level(), CommitmentLevel::Finalized);
        assert!(config.skip_preflight);
        assert_eq!(config.rpc_url, "https://api.devnet.solana.com");
    }

    #[test]
    fn json_config() {
        let config = BindingsConfig::from_json_str(&format!(
            r#"{{ "program_id": "{PROGRAM}", "cluster": "devnet", "commitment": "processed" }}"#
        ))
        .unwrap();
        // No devnet id configured, so the main id is used.
        assert_eq!(config.active_program_id(), &parse_address(PROGRAM).unwrap());
        assert_eq!(config.commitment, Commitment::Processed);

        assert!(BindingsConfig::from_json_str(r#"{ "program": "x" }"#).is_err());
    }
}
