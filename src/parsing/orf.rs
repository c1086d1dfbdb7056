//! ORF coordinates from Prodigal-style headers.
//!
//! Prodigal writes predicted genes as
//! `contig_1_2 # 1201 # 2061 # -1 # ID=1_2;partial=00`, where the `_2` suffix
//! numbers the gene on `contig_1` and the strand is `1` or `-1`.

use crate::core::types::Strand;
use crate::parsing::fields::{extract_nth_hash, FieldValue};
use crate::parsing::ParseError;

/// Location of a predicted ORF on its source sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrfCoordinates {
    /// ORF identifier, caller suffix included
    pub orf_from: String,
    pub start: u64,
    pub end: u64,
    pub strand: Strand,
}

impl OrfCoordinates {
    /// Parse a `#`-delimited ORF header.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidFormat` if the header has no `#` fields or a
    /// coordinate is missing, negative or not an integer.
    pub fn from_header(header: &str) -> Result<Self, ParseError> {
        if !header.contains('#') {
            return Err(ParseError::InvalidFormat(format!(
                "ORF header has no '#' delimited fields: {header}"
            )));
        }

        let orf_from = extract_nth_hash(header, 0)?.to_string().trim().to_string();
        let start = coordinate(&extract_nth_hash(header, 1)?, header)?;
        let end = coordinate(&extract_nth_hash(header, 2)?, header)?;

        let strand = match extract_nth_hash(header, 3)? {
            FieldValue::Text(s) if s == "+" => Strand::Forward,
            FieldValue::Text(s) if s == "-" => Strand::Reverse,
            _ => {
                return Err(ParseError::InvalidFormat(format!(
                    "ORF header is missing a strand field: {header}"
                )))
            }
        };

        Ok(Self {
            orf_from,
            start,
            end,
            strand,
        })
    }
}

fn coordinate(value: &FieldValue, header: &str) -> Result<u64, ParseError> {
    value
        .as_int()
        .and_then(|v| u64::try_from(v).ok())
        .ok_or_else(|| ParseError::InvalidFormat(format!("Invalid ORF coordinate in: {header}")))
}
