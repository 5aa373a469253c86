use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_BIND_ADDRESS_AND_PORT: &str = "0.0.0.0:8081";
pub const DEFAULT_ENTREZ_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrategyName {
    // gene search, gene summary then protein sequence
    Entrez,
    // protein search and sequence only, for when the gene record is unusable
    EntrezProtein,
    StaticTable,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address_and_port: String,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_address_and_port: DEFAULT_BIND_ADDRESS_AND_PORT.to_owned(),
            request_timeout_secs: 120,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct EntrezConfig {
    pub base_url: String,
    // NCBI asks for a contact address and tool name with each request
    pub email: Option<String>,
    pub tool: String,
    pub api_key: Option<String>,
    pub organism: String,
}

impl Default for EntrezConfig {
    fn default() -> Self {
        EntrezConfig {
            base_url: DEFAULT_ENTREZ_BASE_URL.to_owned(),
            email: None,
            tool: env!("CARGO_PKG_NAME").to_owned(),
            api_key: None,
            organism: "human".to_owned(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ProviderConfig {
    // tried in order until one gives a non-transient answer
    pub strategies: Vec<StrategyName>,
    pub timeout_secs: u64,
    pub entrez: EntrezConfig,
    // JSON file replacing the built-in gene table
    pub static_table_file: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            strategies: vec![StrategyName::Entrez, StrategyName::EntrezProtein,
                             StrategyName::StaticTable],
            timeout_secs: 20,
            entrez: EntrezConfig::default(),
            static_table_file: None,
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
}

impl Config {
    pub fn read(config_file_name: &str) -> Result<Config> {
        let file = File::open(config_file_name)
            .with_context(|| format!("Failed to read {}", config_file_name))?;
        let reader = BufReader::new(file);

        serde_json::from_reader(reader)
            .with_context(|| format!("failed to parse {}", config_file_name))
    }

    pub fn from_json_str(json: &str) -> Result<Config> {
        serde_json::from_str(json).context("failed to parse configuration")
    }

    // use only the built-in or configured gene table, no network
    pub fn make_offline(&mut self) {
        self.provider.strategies = vec![StrategyName::StaticTable];
    }
}
