//! Parsers for aligner output and sequence inputs.
//!
//! This module provides:
//!
//! - **Field extraction**: typed values from `|` and `#` delimited aligner records
//! - **Gap resolution**: ungapped to gapped alignment coordinates
//! - **ORF headers**: coordinates and strand from Prodigal-style headers
//! - **FASTA files**: submitted proteins and predicted ORF nucleotides
//!
//! ## Example
//!
//! ```rust
//! use rgi_tiers::parsing::fields::{extract_nth_hash, FieldValue};
//! use rgi_tiers::parsing::gaps::find_num_dash;
//!
//! let strand = extract_nth_hash("orf_1 # 10 # 99 # 1 # ID=1_1", 3).unwrap();
//! assert_eq!(strand, FieldValue::Text("+".to_string()));
//!
//! assert_eq!(find_num_dash("AC--GT", 4), 2);
//! ```

use thiserror::Error;

use crate::core::types::InvalidInputType;

pub mod fasta;
pub mod fields;
pub mod gaps;
pub mod orf;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error(transparent)]
    InvalidInputType(#[from] InvalidInputType),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
