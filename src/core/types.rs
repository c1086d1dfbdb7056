use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Confidence tier of a hit against a reference model.
///
/// Ordering follows confidence, so `Loose < Strict < Perfect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TierMatch {
    Loose,
    Strict,
    Perfect,
}

impl std::fmt::Display for TierMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loose => write!(f, "Loose"),
            Self::Strict => write!(f, "Strict"),
            Self::Perfect => write!(f, "Perfect"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid strand '{0}': expected '+' or '-'")]
pub struct InvalidStrand(pub String);

/// Strand of an ORF on its source contig or read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// Parse the `+`/`-` notation used in hit records
    ///
    /// # Errors
    ///
    /// Returns `InvalidStrand` for anything other than `+` or `-`.
    pub fn parse(s: &str) -> Result<Self, InvalidStrand> {
        match s {
            "+" => Ok(Self::Forward),
            "-" => Ok(Self::Reverse),
            other => Err(InvalidStrand(other.to_string())),
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Forward => "+",
            Self::Reverse => "-",
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("input_type invalid (must be 'contig' or 'read'): {0}")]
pub struct InvalidInputType(pub String);

/// Kind of nucleotide input the ORFs were predicted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputType {
    Contig,
    Read,
}

impl InputType {
    /// # Errors
    ///
    /// Returns `InvalidInputType` for anything other than `contig` or `read`.
    pub fn parse(s: &str) -> Result<Self, InvalidInputType> {
        match s {
            "contig" => Ok(Self::Contig),
            "read" => Ok(Self::Read),
            other => Err(InvalidInputType(other.to_string())),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contig => "contig",
            Self::Read => "read",
        }
    }
}
