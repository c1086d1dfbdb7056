//! Nucleotide retrieval and translation.
//!
//! - [`fetch`]: coordinate-bounded subsequences from a [`fetch::SequenceSource`]
//! - [`translate`]: strand-aware translation with genetic code table 11

pub mod fetch;
pub mod translate;

pub use fetch::{get_part_sequence, FastaFile, FetchError, SequenceSource};
pub use translate::{translate_on_strand, GeneticCode};
