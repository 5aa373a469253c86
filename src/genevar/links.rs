use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::data_types::ExternalLinks;
use crate::types::{GeneSymbol, MimNumber, Url};

// leave the characters that appear in real gene symbols alone so that
// the links match the ones people have already bookmarked
const GENE_QUERY_ENCODE_SET: &AsciiSet =
    &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

const OMIM_ENTRY_URL: &str = "https://www.omim.org/entry/";
const OMIM_SEARCH_URL: &str = "https://www.omim.org/search/?search=";
const UNIPROT_URL: &str = "https://www.uniprot.org/uniprot/?query=";
const ALPHAMISSENSE_URL: &str = "https://alphamissense.hegelab.org/search?query=";

// RCSB search request JSON, already URL encoded, split around the gene name
const PDB_URL_PREFIX: &str = "https://www.rcsb.org/search?request=%7B%22query%22%3A%7B%22type%22%3A%22group%22%2C%22logical_operator%22%3A%22and%22%2C%22nodes%22%3A%5B%7B%22type%22%3A%22terminal%22%2C%22service%22%3A%22text%22%2C%22parameters%22%3A%7B%22attribute%22%3A%22struct_keywords.pdbx_description%22%2C%22operator%22%3A%22contains_phrase%22%2C%22value%22%3A%22";
const PDB_URL_SUFFIX: &str = "%22%7D%7D%5D%7D%2C%22return_type%22%3A%22entry%22%2C%22request_options%22%3A%7B%22pager%22%3A%7B%22start%22%3A0%2C%22rows%22%3A25%7D%2C%22scoring_strategy%22%3A%22combined%22%2C%22sort%22%3A%5B%7B%22sort_by%22%3A%22score%22%2C%22direction%22%3A%22desc%22%7D%5D%7D%7D";

fn encode_gene(gene: &GeneSymbol) -> String {
    utf8_percent_encode(gene.as_str(), GENE_QUERY_ENCODE_SET).to_string()
}

pub fn omim_link(gene: &GeneSymbol, maybe_mim_number: Option<&str>) -> Url {
    match maybe_mim_number.map(str::trim).filter(|mim| !mim.is_empty()) {
        Some(mim_number) => {
            format!("{}{}", OMIM_ENTRY_URL,
                    utf8_percent_encode(mim_number, GENE_QUERY_ENCODE_SET))
        },
        None => format!("{}{}", OMIM_SEARCH_URL, encode_gene(gene)),
    }
}

pub fn uniprot_link(gene: &GeneSymbol) -> Url {
    format!("{}{}&sort=score", UNIPROT_URL, encode_gene(gene))
}

pub fn pdb_link(gene: &GeneSymbol) -> Url {
    format!("{}{}{}", PDB_URL_PREFIX, encode_gene(gene), PDB_URL_SUFFIX)
}

pub fn alphamissense_link(gene: &GeneSymbol) -> Url {
    format!("{}{}", ALPHAMISSENSE_URL, encode_gene(gene))
}

pub fn make_external_links(gene: &GeneSymbol, mim_number: Option<&MimNumber>)
                           -> ExternalLinks
{
    ExternalLinks {
        omim: omim_link(gene, mim_number.map(String::as_str)),
        uniprot: uniprot_link(gene),
        pdb: pdb_link(gene),
        alphamissense: alphamissense_link(gene),
    }
}
