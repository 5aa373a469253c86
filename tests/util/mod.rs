use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use genevar::data_types::GeneRecord;
use genevar::links::make_external_links;
use genevar::provider::{GeneProvider, ProviderError, ProviderResult};
use genevar::types::GeneSymbol;

#[allow(dead_code)]
pub fn make_record(gene: &str, wild_type_sequence: Option<&str>) -> GeneRecord {
    let gene_name = GeneSymbol::new(gene).unwrap();
    GeneRecord {
        external_links: make_external_links(&gene_name, None),
        gene_name,
        description: format!("{} description", gene),
        phenotype: format!("{} phenotype", gene),
        wild_type_sequence: wild_type_sequence.map(String::from),
    }
}

#[allow(dead_code)]
pub enum StubAnswer {
    Record(Option<&'static str>),
    NotFound,
    Transient(&'static str),
    Hang,
}

// a provider with a fixed answer that counts how often it's called
#[allow(dead_code)]
pub struct StubProvider {
    pub name: &'static str,
    pub answer: StubAnswer,
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl StubProvider {
    pub fn new(name: &'static str, answer: StubAnswer) -> StubProvider {
        StubProvider {
            name,
            answer,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeneProvider for StubProvider {
    async fn resolve(&self, gene: &GeneSymbol) -> ProviderResult {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.answer {
            StubAnswer::Record(seq) => Ok(make_record(gene.as_str(), seq)),
            StubAnswer::NotFound => Err(ProviderError::NotFound(gene.clone())),
            StubAnswer::Transient(message) => Err(ProviderError::Transient(message.to_owned())),
            StubAnswer::Hang => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(make_record(gene.as_str(), None))
            },
        }
    }

    fn name(&self) -> &str {
        self.name
    }
}
