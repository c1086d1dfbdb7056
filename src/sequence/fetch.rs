//! Coordinate-bounded subsequence retrieval.
//!
//! [`get_part_sequence`] recovers the nucleotides flanking an ORF that are
//! needed to complete a hit whose N-terminus is missing. Sequences come from a
//! [`SequenceSource`]; [`FastaFile`] is the file-backed source, opened fresh on
//! every fetch.

use std::collections::HashMap;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use noodles::core::{Position, Region};
use noodles::fasta;
use thiserror::Error;
use tracing::info;

use crate::core::types::{InvalidStrand, Strand};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    InvalidStrand(#[from] InvalidStrand),

    #[error("Sequence '{0}' not found")]
    UnknownSequence(String),

    #[error("Region {name}:{start}-{end} starts before the first base")]
    OutOfBounds { name: String, start: i64, end: i64 },

    #[error("noodles error: {0}")]
    Noodles(String),
}

/// Random access to named nucleotide sequences.
///
/// Coordinates are 1-based and inclusive. An `end` past the sequence is
/// truncated to its length and a `start` past the sequence yields an empty
/// string.
pub trait SequenceSource {
    /// # Errors
    ///
    /// Returns `FetchError::UnknownSequence` if `name` is absent,
    /// `FetchError::OutOfBounds` if `start < 1`, or a backend error.
    fn fetch(&self, name: &str, start: i64, end: i64) -> Result<String, FetchError>;
}

/// Clamp a 1-based inclusive request to a sequence of `length` bases.
///
/// Returns `None` when the request selects nothing.
fn clamp_region(
    name: &str,
    start: i64,
    end: i64,
    length: u64,
) -> Result<Option<(usize, usize)>, FetchError> {
    if start < 1 {
        return Err(FetchError::OutOfBounds {
            name: name.to_string(),
            start,
            end,
        });
    }

    let length = usize::try_from(length).unwrap_or(usize::MAX);
    let start = usize::try_from(start).unwrap_or(usize::MAX);
    let end = usize::try_from(end).unwrap_or(0).min(length);

    if start > end {
        Ok(None)
    } else {
        Ok(Some((start, end)))
    }
}

impl<S: std::hash::BuildHasher> SequenceSource for HashMap<String, String, S> {
    fn fetch(&self, name: &str, start: i64, end: i64) -> Result<String, FetchError> {
        let sequence = self
            .get(name)
            .ok_or_else(|| FetchError::UnknownSequence(name.to_string()))?;

        Ok(
            match clamp_region(name, start, end, sequence.len() as u64)? {
                Some((start, end)) => sequence.get(start - 1..end).unwrap_or("").to_string(),
                None => String::new(),
            },
        )
    }
}

/// A FASTA file on disk.
///
/// With a `.fai` index alongside, fetches seek straight to the region;
/// otherwise the file is scanned until the named record is found. Case is
/// preserved and records are keyed by the first word of their header.
#[derive(Debug, Clone)]
pub struct FastaFile {
    path: PathBuf,
}

impl FastaFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn index_path(&self) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(".fai");
        PathBuf::from(path)
    }

    fn fetch_indexed(&self, name: &str, start: i64, end: i64) -> Result<String, FetchError> {
        let mut reader = fasta::io::indexed_reader::Builder::default()
            .build_from_path(&self.path)
            .map_err(|e| FetchError::Noodles(format!("Failed to open indexed FASTA: {e}")))?;

        let length = reader
            .index()
            .as_ref()
            .iter()
            .find(|record| is_named(record.name(), name))
            .map(fasta::fai::Record::length)
            .ok_or_else(|| FetchError::UnknownSequence(name.to_string()))?;

        let Some((start, end)) = clamp_region(name, start, end, length)? else {
            return Ok(String::new());
        };

        let (Some(start), Some(end)) = (Position::new(start), Position::new(end)) else {
            return Ok(String::new());
        };
        let region = Region::new(name, start..=end);

        let record = reader
            .query(&region)
            .map_err(|e| FetchError::Noodles(format!("Failed to query {name}: {e}")))?;

        Ok(String::from_utf8_lossy(record.sequence().as_ref()).to_string())
    }

    fn fetch_scanning(&self, name: &str, start: i64, end: i64) -> Result<String, FetchError> {
        let mut reader = std::fs::File::open(&self.path)
            .map(BufReader::new)
            .map(fasta::io::Reader::new)?;

        for result in reader.records() {
            let record = result
                .map_err(|e| FetchError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

            if !is_named(record.name(), name) {
                continue;
            }

            let sequence = record.sequence().as_ref();
            return Ok(
                match clamp_region(name, start, end, sequence.len() as u64)? {
                    Some((start, end)) => String::from_utf8_lossy(&sequence[start - 1..end]).to_string(),
                    None => String::new(),
                },
            );
        }

        Err(FetchError::UnknownSequence(name.to_string()))
    }
}

impl SequenceSource for FastaFile {
    fn fetch(&self, name: &str, start: i64, end: i64) -> Result<String, FetchError> {
        if self.index_path().exists() {
            self.fetch_indexed(name, start, end)
        } else {
            self.fetch_scanning(name, start, end)
        }
    }
}

fn is_named(record_name: &[u8], name: &str) -> bool {
    record_name == name.as_bytes()
}

/// Strip the trailing `_<n>` an ORF caller appends to the source sequence id.
///
/// A header without `_` is returned unchanged.
#[must_use]
pub fn source_sequence_id(orf_header: &str) -> &str {
    orf_header
        .rfind('_')
        .map_or(orf_header, |idx| &orf_header[..idx])
}

/// Fetch the `length` nucleotides flanking an ORF on the side where its
/// N-terminus would continue.
///
/// - `-` strand: `[stop, stop + length]`, downstream of the ORF on the contig
/// - `+` strand: `[start - length, start]`, upstream of the ORF
///
/// Both ranges are 1-based inclusive, so `length + 1` bases are requested.
/// `label` names the reference being completed and is only logged.
///
/// # Errors
///
/// Returns `FetchError::InvalidStrand` for a strand other than `+`/`-`, and
/// propagates errors from `source`.
pub fn get_part_sequence(
    source: &dyn SequenceSource,
    orf_header: &str,
    start: u64,
    stop: u64,
    length: u64,
    strand: &str,
    label: &str,
) -> Result<String, FetchError> {
    let strand = Strand::parse(strand)?;
    let name = source_sequence_id(orf_header);

    let (start, stop, length) = (to_signed(start), to_signed(stop), to_signed(length));
    info!(
        reference = label,
        contig = name,
        strand = %strand,
        start,
        stop,
        length,
        "Fetching partial sequence"
    );

    match strand {
        Strand::Reverse => source.fetch(name, stop, stop.saturating_add(length)),
        Strand::Forward => source.fetch(name, start.saturating_sub(length), start),
    }
}

fn to_signed(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
