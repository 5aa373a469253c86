use serde::Deserializer;
use serde_json::Value;

use crate::types::{GeneDescription, GenePhenotype, GeneSymbol, ProteinSequence, Url,
                   VariantNotation};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ExternalLinks {
    pub omim: Url,
    pub uniprot: Url,
    pub pdb: Url,
    pub alphamissense: Url,
}

// what a provider returns for a gene
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GeneRecord {
    pub gene_name: GeneSymbol,
    pub description: GeneDescription,
    pub phenotype: GenePhenotype,
    pub external_links: ExternalLinks,
    // None if the provider couldn't find a protein sequence
    pub wild_type_sequence: Option<ProteinSequence>,
}

// a variant that isn't a string is kept as its JSON text so that it's
// reported as an invalid variant rather than failing the request
fn deserialize_variant<'de, D>(deserializer: D) -> Result<Option<VariantNotation>, D::Error>
where
    D: Deserializer<'de>,
{
    let maybe_value: Option<Value> = serde::Deserialize::deserialize(deserializer)?;

    Ok(match maybe_value {
        None | Some(Value::Null) => None,
        Some(Value::String(variant)) => Some(variant),
        Some(other) => Some(other.to_string()),
    })
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneInfoRequest {
    #[serde(default)]
    pub gene: Option<String>,
    #[serde(default, deserialize_with = "deserialize_variant")]
    pub variant: Option<VariantNotation>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GeneInfoResponse {
    pub gene_name: GeneSymbol,
    pub description: GeneDescription,
    pub phenotype: GenePhenotype,
    pub external_links: ExternalLinks,
    pub wild_type_sequence: Option<ProteinSequence>,
    pub variant: Option<VariantNotation>,
    // the mutated sequence, an explanation of why the variant couldn't be
    // applied or "" if there was no variant
    pub variant_sequence: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
