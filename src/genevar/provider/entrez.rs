use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::bio::fasta::fasta_sequence;
use crate::data_types::GeneRecord;
use crate::links::make_external_links;
use crate::provider::{GeneProvider, ProviderError, ProviderResult};
use crate::types::{EntrezId, GeneSymbol, MimNumber, ProteinSequence};
use crate::web::config::EntrezConfig;

pub const NO_DESCRIPTION: &str = "No description available";
pub const NO_PHENOTYPE: &str = "Phenotype information is not yet implemented.";

#[derive(Deserialize, Debug)]
struct ESearchResult {
    #[serde(default)]
    idlist: Vec<EntrezId>,
    #[serde(rename = "ERROR")]
    error: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ESearchResponse {
    esearchresult: Option<ESearchResult>,
    error: Option<String>,
}

// the "result" object of an esummary response has a "uids" list and one
// document per uid, keyed by the uid
#[derive(Deserialize, Debug)]
struct ESummaryResult {
    #[serde(default)]
    uids: Vec<EntrezId>,
    #[serde(flatten)]
    docs: HashMap<String, serde_json::Value>,
}

#[derive(Deserialize, Debug)]
struct ESummaryResponse {
    result: Option<ESummaryResult>,
    error: Option<String>,
}

/// The fields of an esummary "gene" document that we use.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneSummary {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub mim: Vec<MimNumber>,
    #[serde(default)]
    pub error: Option<String>,
}

impl GeneSummary {
    // prefer the long summary, then the short description
    pub fn best_description(&self) -> String {
        [&self.summary, &self.description]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or(NO_DESCRIPTION)
            .to_owned()
    }
}

fn transient(message: String) -> ProviderError {
    ProviderError::Transient(message)
}

fn decode_json<T: DeserializeOwned>(what: &str, body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body)
        .map_err(|err| transient(format!("Error parsing {} response from NCBI: {}", what, err)))
}

/// Return the first ID from an esearch JSON response, or None if there
/// were no hits.
pub fn decode_esearch(body: &str) -> Result<Option<EntrezId>, ProviderError> {
    let response: ESearchResponse = decode_json("esearch", body)?;

    if let Some(error) = response.error {
        return Err(transient(format!("esearch failed: {}", error)));
    }

    let result = response.esearchresult
        .ok_or_else(|| transient("esearch response has no esearchresult".to_owned()))?;

    if let Some(error) = result.error {
        return Err(transient(format!("esearch failed: {}", error)));
    }

    Ok(result.idlist.into_iter().next())
}

/// Return the summary document for `gene_id` from an esummary JSON response.
pub fn decode_gene_summary(body: &str, gene_id: &str) -> Result<GeneSummary, ProviderError> {
    let response: ESummaryResponse = decode_json("esummary", body)?;

    if let Some(error) = response.error {
        return Err(transient(format!("esummary failed: {}", error)));
    }

    let mut result = response.result
        .ok_or_else(|| transient("esummary response has no result".to_owned()))?;

    if !result.uids.iter().any(|uid| uid == gene_id) {
        return Err(transient(format!("esummary response doesn't include gene {}", gene_id)));
    }

    let doc = result.docs.remove(gene_id)
        .ok_or_else(|| transient(format!("no esummary document for gene {}", gene_id)))?;

    let summary: GeneSummary = serde_json::from_value(doc)
        .map_err(|err| transient(format!("Error parsing esummary document: {}", err)))?;

    if let Some(ref error) = summary.error {
        return Err(transient(format!("esummary failed for gene {}: {}", gene_id, error)));
    }

    Ok(summary)
}

/// Return the residues from an efetch FASTA response, or None if the
/// response has no sequence.
pub fn decode_protein_fasta(body: &str) -> Option<ProteinSequence> {
    let sequence = fasta_sequence(body);

    if sequence.is_empty() {
        None
    } else {
        Some(sequence)
    }
}

pub struct EntrezClient {
    http: reqwest::Client,
    config: EntrezConfig,
}

impl EntrezClient {
    pub fn new(config: &EntrezConfig) -> Result<EntrezClient> {
        let http = reqwest::Client::builder()
            .user_agent(format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to create HTTP client for NCBI")?;

        Ok(EntrezClient {
            http,
            config: config.clone(),
        })
    }

    fn search_term(&self, gene: &GeneSymbol) -> String {
        format!("{}[Gene Name] AND {}[Organism]", gene, self.config.organism)
    }

    async fn get_text(&self, utility: &str, params: &[(&str, &str)])
                      -> Result<String, ProviderError>
    {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), utility);

        let mut query: Vec<(&str, &str)> = params.to_vec();
        query.push(("tool", self.config.tool.as_str()));
        if let Some(ref email) = self.config.email {
            query.push(("email", email.as_str()));
        }
        if let Some(ref api_key) = self.config.api_key {
            query.push(("api_key", api_key.as_str()));
        }

        tracing::debug!("NCBI request: {} {:?}", url, params);

        let res = self.http.get(&url).query(&query).send().await
            .map_err(|err| transient(format!("Error from Reqwest: {} for {}", err, url)))?;

        let status = res.status();

        if !status.is_success() {
            return Err(
                if let Some(reason) = status.canonical_reason() {
                    transient(format!("HTTP request to NCBI failed: {} - {}", status, reason))
                } else {
                    transient(format!("HTTP request to NCBI failed with status code: {}",
                                      status))
                });
        }

        res.text().await
            .map_err(|err| transient(format!("Error reading response from NCBI: {}", err)))
    }

    pub async fn search(&self, db: &str, gene: &GeneSymbol)
                        -> Result<Option<EntrezId>, ProviderError>
    {
        let term = self.search_term(gene);
        let params = [("db", db), ("term", term.as_str()), ("retmax", "1"),
                      ("retmode", "json")];
        let body = self.get_text("esearch.fcgi", &params).await?;
        decode_esearch(&body)
    }

    pub async fn gene_summary(&self, gene_id: &str) -> Result<GeneSummary, ProviderError> {
        let params = [("db", "gene"), ("id", gene_id), ("retmode", "json")];
        let body = self.get_text("esummary.fcgi", &params).await?;
        decode_gene_summary(&body, gene_id)
    }

    pub async fn protein_sequence(&self, protein_id: &str)
                                  -> Result<Option<ProteinSequence>, ProviderError>
    {
        let params = [("db", "protein"), ("id", protein_id), ("rettype", "fasta"),
                      ("retmode", "text")];
        let body = self.get_text("efetch.fcgi", &params).await?;
        Ok(decode_protein_fasta(&body))
    }

    // None if there is no protein for the gene
    pub async fn search_protein_sequence(&self, gene: &GeneSymbol)
                                         -> Result<Option<ProteinSequence>, ProviderError>
    {
        match self.search("protein", gene).await? {
            Some(protein_id) => self.protein_sequence(&protein_id).await,
            None => Ok(None),
        }
    }
}

/// Looks up the gene record for the summary and OMIM number, then the
/// first matching protein for the sequence.
pub struct EntrezGeneProvider {
    client: Arc<EntrezClient>,
}

impl EntrezGeneProvider {
    pub fn new(client: Arc<EntrezClient>) -> EntrezGeneProvider {
        EntrezGeneProvider {
            client,
        }
    }
}

#[async_trait]
impl GeneProvider for EntrezGeneProvider {
    async fn resolve(&self, gene: &GeneSymbol) -> ProviderResult {
        let gene_id = self.client.search("gene", gene).await?
            .ok_or_else(|| ProviderError::NotFound(gene.clone()))?;

        let summary = self.client.gene_summary(&gene_id).await?;

        let wild_type_sequence = self.client.search_protein_sequence(gene).await?;

        Ok(GeneRecord {
            gene_name: gene.clone(),
            description: summary.best_description(),
            phenotype: NO_PHENOTYPE.to_owned(),
            external_links: make_external_links(gene, summary.mim.first()),
            wild_type_sequence,
        })
    }

    fn name(&self) -> &str {
        "entrez"
    }
}

/// Fallback that skips the gene record and only fetches the protein
/// sequence.
pub struct EntrezProteinProvider {
    client: Arc<EntrezClient>,
}

impl EntrezProteinProvider {
    pub fn new(client: Arc<EntrezClient>) -> EntrezProteinProvider {
        EntrezProteinProvider {
            client,
        }
    }
}

#[async_trait]
impl GeneProvider for EntrezProteinProvider {
    async fn resolve(&self, gene: &GeneSymbol) -> ProviderResult {
        let wild_type_sequence = self.client.search_protein_sequence(gene).await?
            .ok_or_else(|| ProviderError::NotFound(gene.clone()))?;

        Ok(GeneRecord {
            gene_name: gene.clone(),
            description: NO_DESCRIPTION.to_owned(),
            phenotype: NO_PHENOTYPE.to_owned(),
            external_links: make_external_links(gene, None),
            wild_type_sequence: Some(wild_type_sequence),
        })
    }

    fn name(&self) -> &str {
        "entrez_protein"
    }
}
