use regex::Regex;
use thiserror::Error;

use crate::bio::variant::apply_variant;
use crate::data_types::{GeneInfoRequest, GeneInfoResponse, GeneRecord};
use crate::provider::{GeneProvider, ProviderError};
use crate::types::GeneSymbol;

pub const MAX_GENE_NAME_LENGTH: usize = 20;

lazy_static! {
    // symbols are passed to NCBI as part of a search term so only letters,
    // digits and '-' are allowed
    static ref GENE_NAME_RE: Regex = Regex::new(r"^[A-Za-z0-9-]+$").unwrap();
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Gene name is required.")]
    MissingInput,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Invalid gene name format: '{0}'. Use letters, digits and '-' only.")]
    InvalidGeneName(String),
    #[error("Gene name too long (max 20 characters): '{0}'")]
    GeneNameTooLong(String),
    #[error("Gene not found: {0}")]
    GeneNotFound(GeneSymbol),
    #[error("Gene lookup service unavailable: {0}")]
    ProviderUnavailable(String),
}

impl From<ProviderError> for LookupError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotFound(gene) => LookupError::GeneNotFound(gene),
            ProviderError::Transient(message) => LookupError::ProviderUnavailable(message),
        }
    }
}

// blank form fields count as missing
fn non_blank(maybe_value: Option<&str>) -> Option<&str> {
    maybe_value.map(str::trim).filter(|value| !value.is_empty())
}

/// Work out the variant_sequence field.  Variant problems end up as a
/// message rather than an error so the gene details are still returned.
pub fn variant_sequence(record: &GeneRecord, maybe_variant: Option<&str>) -> String {
    let Some(variant) = maybe_variant else {
        return String::new();
    };

    let Some(ref wild_type) = record.wild_type_sequence else {
        tracing::debug!("no sequence for {}, ignoring variant {}", record.gene_name, variant);
        return String::new();
    };

    match apply_variant(wild_type, variant) {
        Ok(variant_sequence) => variant_sequence,
        Err(err) => {
            tracing::debug!("variant {} of {}: {}", variant, record.gene_name, err);
            err.to_string()
        }
    }
}

pub fn make_response(record: GeneRecord, maybe_variant: Option<&str>) -> GeneInfoResponse {
    let variant_sequence = variant_sequence(&record, maybe_variant);

    GeneInfoResponse {
        gene_name: record.gene_name,
        description: record.description,
        phenotype: record.phenotype,
        external_links: record.external_links,
        wild_type_sequence: record.wild_type_sequence,
        variant: maybe_variant.map(str::to_owned),
        variant_sequence,
    }
}

/// Check a trimmed, non-blank gene name from a request and canonicalise it.
pub fn parse_gene_name(gene_name: &str) -> Result<GeneSymbol, LookupError> {
    if !GENE_NAME_RE.is_match(gene_name) {
        return Err(LookupError::InvalidGeneName(gene_name.to_owned()));
    }

    if gene_name.chars().count() > MAX_GENE_NAME_LENGTH {
        return Err(LookupError::GeneNameTooLong(gene_name.to_owned()));
    }

    GeneSymbol::new(gene_name).ok_or(LookupError::MissingInput)
}

pub async fn lookup_gene_info(provider: &dyn GeneProvider, request: &GeneInfoRequest)
                              -> Result<GeneInfoResponse, LookupError>
{
    let gene_name = non_blank(request.gene.as_deref()).ok_or(LookupError::MissingInput)?;
    let gene = parse_gene_name(gene_name)?;

    let maybe_variant = non_blank(request.variant.as_deref());

    let record = provider.resolve(&gene).await?;

    Ok(make_response(record, maybe_variant))
}
