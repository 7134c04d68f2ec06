use anyhow::{Context, Result};
use std::env;
use url::Url;

/// Environment variable selecting the RPC endpoint for read-only queries.
pub const RPC_URL_ENV: &str = "STARKNET_RPC_URL";

/// RPC endpoint of the original Sepolia deployment, used when no override
/// is present.
pub const DEFAULT_RPC_URL: &str = "https://starknet-sepolia.public.blastapi.io/rpc/v0_7";

/// A known Starknet network with label, chain id, default RPC, and explorer.
#[derive(Clone, Debug)]
pub struct StarknetNetwork {
    pub label: &'static str,
    pub chain_id: &'static str,
    pub default_rpc: &'static str,
    pub explorer: &'static str,
}

impl StarknetNetwork {
    pub const fn new(
        label: &'static str,
        chain_id: &'static str,
        default_rpc: &'static str,
        explorer: &'static str,
    ) -> Self {
        Self {
            label,
            chain_id,
            default_rpc,
            explorer,
        }
    }
}

/// Networks the distributor contract is known on.
pub const NETWORKS: &[StarknetNetwork] = &[
    StarknetNetwork::new(
        "Mainnet",
        "SN_MAIN",
        "https://starknet-mainnet.public.blastapi.io/rpc/v0_7",
        "https://starkscan.co",
    ),
    StarknetNetwork::new(
        "Sepolia",
        "SN_SEPOLIA",
        DEFAULT_RPC_URL,
        "https://sepolia.starkscan.co",
    ),
];

/// Find a network by label (case-insensitive)
pub fn find_network(label: &str) -> Option<&'static StarknetNetwork> {
    NETWORKS.iter().find(|n| n.label.eq_ignore_ascii_case(label))
}

/// Find a network by chain id
pub fn find_network_by_chain_id(chain_id: &str) -> Option<&'static StarknetNetwork> {
    NETWORKS.iter().find(|n| n.chain_id == chain_id)
}

/// Get the full URL to view a transaction on the network's block explorer
pub fn get_tx_explorer_url(label: &str, tx_hash: &str) -> Option<String> {
    find_network(label).map(|n| format!("{}/tx/{}", n.explorer, tx_hash))
}

#[derive(Clone, Debug)]
pub struct Config {
    pub rpc_url: String,
    pub network_label: String,
}

impl Config {
    pub fn new(rpc_url: String, network_label: String) -> Self {
        Self {
            rpc_url,
            network_label,
        }
    }

    pub fn from_network(network: &StarknetNetwork) -> Self {
        Self::new(network.default_rpc.to_string(), network.label.to_string())
    }

    /// Build a config from the environment: `STARKNET_RPC_URL` overrides
    /// the default endpoint. The URL is validated up front so a typo fails
    /// at startup rather than at first use.
    pub fn from_env() -> Result<Self> {
        let rpc_url = env::var(RPC_URL_ENV).unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());
        Url::parse(&rpc_url).with_context(|| format!("invalid RPC URL '{}'", rpc_url))?;

        let network_label = NETWORKS
            .iter()
            .find(|n| n.default_rpc == rpc_url)
            .map(|n| n.label.to_string())
            .unwrap_or_else(|| "Custom".to_string());

        Ok(Self {
            rpc_url,
            network_label,
        })
    }

    pub fn network_label(&self) -> &str {
        &self.network_label
    }

    pub fn tx_explorer_url(&self, tx_hash: &str) -> Option<String> {
        get_tx_explorer_url(&self.network_label, tx_hash)
    }
}

impl Default for Config {
    fn default() -> Self {
        // Default to Sepolia - the distributor's primary deployment
        if let Some(sepolia) = find_network("Sepolia") {
            Self::from_network(sepolia)
        } else {
            Self::new(DEFAULT_RPC_URL.to_string(), "Sepolia".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== network lookup tests ====================

    #[test]
    fn test_find_network_is_case_insensitive() {
        assert!(find_network("sepolia").is_some());
        assert!(find_network("MAINNET").is_some());
        assert!(find_network("devnet").is_none());
    }

    #[test]
    fn test_find_network_by_chain_id() {
        assert_eq!(find_network_by_chain_id("SN_MAIN").unwrap().label, "Mainnet");
        assert!(find_network_by_chain_id("SN_GOERLI").is_none());
    }

    #[test]
    fn test_tx_explorer_url() {
        let url = get_tx_explorer_url("Sepolia", "0xabc").unwrap();
        assert_eq!(url, "https://sepolia.starkscan.co/tx/0xabc");
        assert!(get_tx_explorer_url("Unknown", "0xabc").is_none());
    }

    // ==================== Config tests ====================

    #[test]
    fn test_config_default_is_sepolia() {
        let config = Config::default();
        assert_eq!(config.network_label(), "Sepolia");
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
    }

    #[test]
    fn test_config_from_network() {
        let mainnet = find_network("Mainnet").unwrap();
        let config = Config::from_network(mainnet);
        assert_eq!(config.network_label(), "Mainnet");
        assert_eq!(config.rpc_url, mainnet.default_rpc);
    }

    #[test]
    fn test_config_explorer_link_for_custom_network_is_absent() {
        let config = Config::new("https://example.com/rpc".into(), "Custom".into());
        assert!(config.tx_explorer_url("0xabc").is_none());
    }

    #[test]
    fn test_config_from_env_override() {
        // Single test exercises the env path to avoid races on the var
        env::set_var(RPC_URL_ENV, "https://my-node.example/rpc/v0_7");
        let config = Config::from_env().unwrap();
        assert_eq!(config.rpc_url, "https://my-node.example/rpc/v0_7");
        assert_eq!(config.network_label(), "Custom");

        env::set_var(RPC_URL_ENV, "not a url");
        assert!(Config::from_env().is_err());

        env::remove_var(RPC_URL_ENV);
        let config = Config::from_env().unwrap();
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(config.network_label(), "Sepolia");
    }
}
