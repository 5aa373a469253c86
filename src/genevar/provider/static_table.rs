use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::bio::fasta::fasta_sequence;
use crate::data_types::GeneRecord;
use crate::links::make_external_links;
use crate::provider::{GeneProvider, ProviderError, ProviderResult};
use crate::types::{GeneDescription, GenePhenotype, GeneSymbol, MimNumber, ProteinSequence};

const BUILTIN_GENES_JSON: &str = include_str!("../data/builtin_genes.json");

// one entry of the table file, keyed by gene symbol
#[derive(Deserialize, Clone, Debug)]
pub struct StaticGeneEntry {
    pub description: GeneDescription,
    pub phenotype: GenePhenotype,
    #[serde(default)]
    pub omim_id: Option<MimNumber>,
    #[serde(default)]
    pub wild_type_sequence: Option<ProteinSequence>,
}

/// A read-only gene table, loaded once at startup.
pub struct StaticTableProvider {
    genes: HashMap<GeneSymbol, StaticGeneEntry>,
}

fn normalise_entries(raw_genes: HashMap<String, StaticGeneEntry>)
                     -> Result<HashMap<GeneSymbol, StaticGeneEntry>>
{
    let mut genes = HashMap::new();

    for (raw_symbol, mut entry) in raw_genes {
        let symbol = GeneSymbol::new(&raw_symbol)
            .with_context(|| format!("empty gene symbol in gene table: {:?}", raw_symbol))?;

        entry.wild_type_sequence =
            entry.wild_type_sequence.as_deref()
                .map(fasta_sequence)
                .filter(|seq| !seq.is_empty());

        if genes.insert(symbol.clone(), entry).is_some() {
            anyhow::bail!("gene {} is in the gene table more than once", symbol);
        }
    }

    Ok(genes)
}

impl StaticTableProvider {
    pub fn new(genes: HashMap<GeneSymbol, StaticGeneEntry>) -> StaticTableProvider {
        StaticTableProvider {
            genes,
        }
    }

    pub fn from_json_str(json: &str) -> Result<StaticTableProvider> {
        let raw_genes: HashMap<String, StaticGeneEntry> =
            serde_json::from_str(json).context("failed to parse gene table")?;
        Ok(StaticTableProvider::new(normalise_entries(raw_genes)?))
    }

    pub fn read(file_name: &str) -> Result<StaticTableProvider> {
        let file = File::open(file_name)
            .with_context(|| format!("Failed to read {}", file_name))?;
        let reader = BufReader::new(file);

        let raw_genes: HashMap<String, StaticGeneEntry> =
            serde_json::from_reader(reader)
            .with_context(|| format!("failed to parse {}", file_name))?;

        let table = StaticTableProvider::new(normalise_entries(raw_genes)?);

        tracing::info!("read {} genes from {}", table.len(), file_name);

        Ok(table)
    }

    pub fn builtin() -> Result<StaticTableProvider> {
        StaticTableProvider::from_json_str(BUILTIN_GENES_JSON)
            .context("built-in gene table is invalid")
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn get(&self, gene: &GeneSymbol) -> Option<GeneRecord> {
        let entry = self.genes.get(gene)?;

        Some(GeneRecord {
            gene_name: gene.clone(),
            description: entry.description.clone(),
            phenotype: entry.phenotype.clone(),
            external_links: make_external_links(gene, entry.omim_id.as_ref()),
            wild_type_sequence: entry.wild_type_sequence.clone(),
        })
    }
}

#[async_trait]
impl GeneProvider for StaticTableProvider {
    async fn resolve(&self, gene: &GeneSymbol) -> ProviderResult {
        self.get(gene).ok_or_else(|| ProviderError::NotFound(gene.clone()))
    }

    fn name(&self) -> &str {
        "static_table"
    }
}
