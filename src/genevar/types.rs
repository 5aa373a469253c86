use std::fmt;

pub type AminoAcid = char;
pub type ProteinSequence = String;
pub type VariantNotation = String;

pub type GeneDescription = String;
pub type GenePhenotype = String;
pub type MimNumber = String;
pub type EntrezId = String;
pub type Url = String;

/// A gene symbol like "BRCA1".  Always trimmed and uppercase.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct GeneSymbol(String);

impl GeneSymbol {
    /// Returns None for empty or all whitespace input.
    pub fn new(raw: &str) -> Option<GeneSymbol> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            None
        } else {
            Some(GeneSymbol(trimmed.to_uppercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GeneSymbol {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        GeneSymbol::new(&value).ok_or_else(|| "empty gene symbol".to_owned())
    }
}

impl From<GeneSymbol> for String {
    fn from(symbol: GeneSymbol) -> String {
        symbol.0
    }
}

impl AsRef<str> for GeneSymbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GeneSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
