use std::fmt;

use regex::Regex;
use thiserror::Error;

use crate::types::{AminoAcid, ProteinSequence};

lazy_static! {
    // the whole notation must match, eg. "A123G"
    static ref VARIANT_NOTATION_RE: Regex = Regex::new(r"^([A-Z])([0-9]+)([A-Z])$").unwrap();
}

pub const STANDARD_AMINO_ACIDS: &str = "ACDEFGHIKLMNPQRSTVWY";

// the parser accepts any uppercase letter; this is only used when
// describing a substitution
pub fn is_standard_amino_acid(aa: AminoAcid) -> bool {
    STANDARD_AMINO_ACIDS.contains(aa)
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VariantError {
    #[error("Invalid variant format: '{0}'. Use format like 'A123G'.")]
    InvalidFormat(String),
    #[error("Variant position {position} is outside the protein sequence (length {length}).")]
    PositionOutOfRange {
        position: usize,
        length: usize,
    },
    #[error("Variant reference mismatch at position {position}: expected {expected} but the wild-type sequence has {actual}.")]
    ReferenceMismatch {
        position: usize,
        expected: AminoAcid,
        actual: AminoAcid,
    },
}

/// A single amino acid substitution like "A123G".  `position` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Substitution {
    pub from_aa: AminoAcid,
    pub position: usize,
    pub to_aa: AminoAcid,
}

impl Substitution {
    /// Parse a variant notation, ignoring case.  On failure the error holds
    /// the notation exactly as it was passed in.
    pub fn parse(notation: &str) -> Result<Substitution, VariantError> {
        let upper_notation = notation.to_uppercase();

        let invalid = || VariantError::InvalidFormat(notation.to_owned());

        let captures = VARIANT_NOTATION_RE.captures(&upper_notation).ok_or_else(invalid)?;

        let first_char = |index: usize| {
            captures.get(index).and_then(|m| m.as_str().chars().next())
        };

        let from_aa = first_char(1).ok_or_else(invalid)?;
        let to_aa = first_char(3).ok_or_else(invalid)?;

        let position_str = captures.get(2).ok_or_else(invalid)?.as_str();

        // only digits can get here, so the only failure is overflow and
        // a position that big can't be in range
        let position = position_str.parse::<usize>().unwrap_or(usize::MAX);

        Ok(Substitution {
            from_aa,
            position,
            to_aa,
        })
    }

    /// Return a new sequence with this substitution applied, after checking
    /// the position and the reference residue.  `wild_type` isn't changed.
    pub fn apply(&self, wild_type: &str) -> Result<ProteinSequence, VariantError> {
        let mut residues: Vec<AminoAcid> = wild_type.chars().collect();
        let length = residues.len();

        if self.position == 0 || self.position > length {
            return Err(VariantError::PositionOutOfRange {
                position: self.position,
                length,
            });
        }

        let index = self.position - 1;
        let actual = residues[index];

        if actual != self.from_aa {
            return Err(VariantError::ReferenceMismatch {
                position: self.position,
                expected: self.from_aa,
                actual,
            });
        }

        residues[index] = self.to_aa;

        Ok(residues.into_iter().collect())
    }

    pub fn is_synonymous(&self) -> bool {
        self.from_aa == self.to_aa
    }

    pub fn uses_standard_amino_acids(&self) -> bool {
        is_standard_amino_acid(self.from_aa) && is_standard_amino_acid(self.to_aa)
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.from_aa, self.position, self.to_aa)
    }
}

/// Parse `notation` and apply it to `wild_type` in one step.
pub fn apply_variant(wild_type: &str, notation: &str) -> Result<ProteinSequence, VariantError> {
    Substitution::parse(notation)?.apply(wild_type)
}
