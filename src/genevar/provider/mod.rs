//! Gene metadata providers.
//!
//! A provider turns a gene symbol into a [`GeneRecord`].  "Not found" is an
//! ordinary answer, while network and decoding failures are transient and
//! are kept separate so that they can be reported as the service being
//! unavailable rather than the gene being unknown.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tokio::time::timeout;

use crate::data_types::GeneRecord;
use crate::types::GeneSymbol;
use crate::web::config::{Config, StrategyName};

pub mod entrez;
pub mod static_table;

use self::entrez::{EntrezClient, EntrezGeneProvider, EntrezProteinProvider};
use self::static_table::StaticTableProvider;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Gene not found: {0}")]
    NotFound(GeneSymbol),
    #[error("{0}")]
    Transient(String),
}

pub type ProviderResult = Result<GeneRecord, ProviderError>;

#[async_trait]
pub trait GeneProvider: Send + Sync {
    async fn resolve(&self, gene: &GeneSymbol) -> ProviderResult;

    // for logging
    fn name(&self) -> &str;
}

/// Tries each provider in turn, stopping at the first one that returns a
/// record or NotFound.  If they all fail transiently the last transient
/// error is returned.
pub struct ProviderChain {
    providers: Vec<Arc<dyn GeneProvider>>,
    timeout: Duration,
}

impl ProviderChain {
    pub fn new(providers: Vec<Arc<dyn GeneProvider>>, timeout: Duration) -> ProviderChain {
        ProviderChain {
            providers,
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Result<ProviderChain> {
        let provider_config = &config.provider;

        let mut providers: Vec<Arc<dyn GeneProvider>> = vec![];

        let mut entrez_client = None;

        for strategy_name in &provider_config.strategies {
            let provider: Arc<dyn GeneProvider> =
                match strategy_name {
                    StrategyName::Entrez | StrategyName::EntrezProtein => {
                        let client =
                            match &entrez_client {
                                Some(client) => Arc::clone(client),
                                None => {
                                    let client =
                                        Arc::new(EntrezClient::new(&provider_config.entrez)?);
                                    entrez_client = Some(Arc::clone(&client));
                                    client
                                }
                            };
                        if *strategy_name == StrategyName::Entrez {
                            Arc::new(EntrezGeneProvider::new(client))
                        } else {
                            Arc::new(EntrezProteinProvider::new(client))
                        }
                    },
                    StrategyName::StaticTable => {
                        let table =
                            if let Some(ref file_name) = provider_config.static_table_file {
                                StaticTableProvider::read(file_name)?
                            } else {
                                StaticTableProvider::builtin()?
                            };
                        Arc::new(table)
                    },
                };
            providers.push(provider);
        }

        if providers.is_empty() {
            anyhow::bail!("no gene providers configured");
        }

        Ok(ProviderChain::new(providers, provider_config.timeout()))
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|provider| provider.name()).collect()
    }

    async fn resolve_with_timeout(&self, provider: &dyn GeneProvider, gene: &GeneSymbol)
                                  -> ProviderResult
    {
        match timeout(self.timeout, provider.resolve(gene)).await {
            Ok(result) => result,
            Err(_) => {
                Err(ProviderError::Transient(format!("{} lookup of {} timed out after {}s",
                                                     provider.name(), gene,
                                                     self.timeout.as_secs_f32())))
            }
        }
    }
}

#[async_trait]
impl GeneProvider for ProviderChain {
    async fn resolve(&self, gene: &GeneSymbol) -> ProviderResult {
        let mut last_error =
            ProviderError::Transient(format!("no provider could look up {}", gene));

        for provider in &self.providers {
            match self.resolve_with_timeout(provider.as_ref(), gene).await {
                Err(ProviderError::Transient(message)) => {
                    tracing::warn!("{} failed for {}: {}", provider.name(), gene, message);
                    last_error = ProviderError::Transient(message);
                },
                result => {
                    tracing::debug!("{} answered for {}", provider.name(), gene);
                    return result;
                }
            }
        }

        Err(last_error)
    }

    fn name(&self) -> &str {
        "chain"
    }
}
