//! FASTA loading for submitted proteins and predicted ORFs using noodles.
//!
//! Supports both uncompressed and gzip/bgzip compressed files. Missing or
//! zero-byte files are read as "no sequences present" and give an empty map.

use std::collections::BTreeMap;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use tracing::{debug, info};

use crate::core::types::InputType;
use crate::parsing::ParseError;

/// Sequences keyed by record id (the first word of the header)
pub type SequenceMap = BTreeMap<String, String>;

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Whether the file exists and holds at least one byte
fn has_content(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|m| m.len() > 0)
}

/// Parse a FASTA file into a map of id -> sequence.
///
/// # Errors
///
/// Returns `ParseError::Io` if an existing file cannot be read or
/// `ParseError::Noodles` if a record is malformed.
pub fn read_sequences(path: &Path) -> Result<SequenceMap, ParseError> {
    if !has_content(path) {
        debug!("No sequences in {}", path.display());
        return Ok(SequenceMap::new());
    }

    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        let reader = BufReader::new(MultiGzDecoder::new(file));
        read_sequences_from(&mut fasta::io::Reader::new(reader))
    } else {
        read_sequences_from(&mut fasta::io::Reader::new(BufReader::new(file)))
    }
}

fn read_sequences_from<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<SequenceMap, ParseError> {
    let mut sequences = SequenceMap::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        let name = String::from_utf8_lossy(record.name()).to_string();
        let sequence = String::from_utf8_lossy(record.sequence().as_ref()).to_string();
        sequences.insert(name, sequence);
    }

    Ok(sequences)
}

/// Load the submitted protein sequences.
///
/// # Errors
///
/// See [`read_sequences`].
pub fn get_submitted_protein_sequence(path: &Path) -> Result<SequenceMap, ParseError> {
    read_sequences(path)
}

/// Path of the ORF nucleotide FASTA the ORF caller wrote for `input_file`
#[must_use]
pub fn orf_dna_path(input_file: &Path, input_type: InputType, working_directory: &Path) -> PathBuf {
    let suffix = match input_type {
        InputType::Contig => "temp.contigToORF.fsa",
        InputType::Read => "temp.read.fsa",
    };
    working_directory.join(format!("{}.{suffix}", file_name(input_file)))
}

/// Path of the predicted-genes JSON written by [`get_orf_dna_sequence`]
#[must_use]
pub fn predicted_genes_path(input_file: &Path, working_directory: &Path) -> PathBuf {
    working_directory.join(format!("{}.temp.predictedGenes.json", file_name(input_file)))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Load the predicted ORF nucleotide sequences for `input_file` and record
/// them as JSON next to the other working files.
///
/// `input_type` must be `contig` or `read`; it is checked before any file is
/// touched.
///
/// # Errors
///
/// Returns `ParseError::InvalidInputType` for any other input type,
/// `ParseError::Io` if the JSON cannot be written, or the errors of
/// [`read_sequences`].
pub fn get_orf_dna_sequence(
    input_file: &Path,
    input_type: &str,
    working_directory: &Path,
) -> Result<SequenceMap, ParseError> {
    let input_type = InputType::parse(input_type)?;

    let orf_path = orf_dna_path(input_file, input_type, working_directory);
    let predicted_genes = read_sequences(&orf_path)?;

    let json_path = predicted_genes_path(input_file, working_directory);
    std::fs::write(&json_path, serde_json::to_string(&predicted_genes)?)?;

    info!(
        "Loaded {} predicted ORFs from {}",
        predicted_genes.len(),
        orf_path.display()
    );

    Ok(predicted_genes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_read_sequences() {
        let fasta_content = b">prot1 beta-lactamase\nMKTAYIAK\nQRQ\n>prot2\nmsir\n";

        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(fasta_content).unwrap();
        temp.flush().unwrap();

        let sequences = get_submitted_protein_sequence(temp.path()).unwrap();
        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences["prot1"], "MKTAYIAKQRQ");
        assert_eq!(sequences["prot2"], "msir");
    }

    #[test]
    fn test_read_sequences_gzipped() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut temp = NamedTempFile::with_suffix(".fa.gz").unwrap();
        {
            let mut encoder = GzEncoder::new(&mut temp, Compression::default());
            encoder.write_all(b">orf_1\nATGAAA\n").unwrap();
            encoder.finish().unwrap();
        }
        temp.flush().unwrap();

        let sequences = read_sequences(temp.path()).unwrap();
        assert_eq!(sequences["orf_1"], "ATGAAA");
    }

    #[test]
    fn test_empty_and_missing_files_are_empty() {
        let temp = NamedTempFile::with_suffix(".fa").unwrap();
        assert!(read_sequences(temp.path()).unwrap().is_empty());

        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.fa");
        assert!(read_sequences(&missing).unwrap().is_empty());
    }

    #[test]
    fn test_get_orf_dna_sequence_contig() {
        let dir = TempDir::new().unwrap();
        let input = Path::new("/data/sample.fasta");
        std::fs::write(
            dir.path().join("sample.fasta.temp.contigToORF.fsa"),
            ">contig_1_1 # 1 # 9 # 1\nATGAAATAA\n",
        )
        .unwrap();

        let genes = get_orf_dna_sequence(input, "contig", dir.path()).unwrap();
        assert_eq!(genes["contig_1_1"], "ATGAAATAA");

        let json = std::fs::read_to_string(predicted_genes_path(input, dir.path())).unwrap();
        let written: SequenceMap = serde_json::from_str(&json).unwrap();
        assert_eq!(written, genes);
    }

    #[test]
    fn test_get_orf_dna_sequence_read_without_predictions() {
        let dir = TempDir::new().unwrap();
        let input = Path::new("reads.fq");

        let genes = get_orf_dna_sequence(input, "read", dir.path()).unwrap();
        assert!(genes.is_empty());
        assert!(predicted_genes_path(input, dir.path()).exists());
    }

    #[test]
    fn test_get_orf_dna_sequence_invalid_input_type() {
        let dir = TempDir::new().unwrap();
        let result = get_orf_dna_sequence(Path::new("x.fa"), "protein", dir.path());
        assert!(matches!(result, Err(ParseError::InvalidInputType(_))));
        assert!(!predicted_genes_path(Path::new("x.fa"), dir.path()).exists());
    }
}
