pub mod fasta;
pub mod variant;
