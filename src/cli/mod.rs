//! Command-line interface for rgi-tiers.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **classify**: Report one tier of hits per query from pre-bucketed aligner hits
//! - **partial**: Fetch and translate the bases upstream of a predicted ORF
//! - **predicted-genes**: Collect the ORF caller's nucleotide output as JSON
//!
//! ## Usage
//!
//! ```text
//! # Classify hits, completing missing N-termini from the submitted contigs
//! rgi-tiers classify --hits hits.json --input-sequence contigs.fasta
//!
//! # Also report loose hits that could not be nudged
//! rgi-tiers classify --hits hits.json --loose --format tsv
//!
//! # Inspect the 30 bases upstream of a Prodigal ORF
//! rgi-tiers partial --input-sequence contigs.fasta \
//!     --orf "contig_1_2 # 1201 # 2061 # 1 # ID=1_2" --length 30
//!
//! # Write contigs.fasta.temp.predictedGenes.json from the ORF caller's output
//! rgi-tiers predicted-genes --input-sequence contigs.fasta --input-type contig -w work/
//! ```

use clap::{Parser, Subcommand};

pub mod classify;
pub mod partial;
pub mod predicted;

#[derive(Parser)]
#[command(name = "rgi-tiers")]
#[command(version)]
#[command(about = "Classify resistance-gene hits into Perfect, Strict and Loose tiers")]
#[command(
    long_about = "rgi-tiers decides which tier of alignment hits to report for each query against a curated resistance-gene reference database.\n\nBorderline hits are nudged upward when the evidence supports it:\n- Strict hits become Perfect when the ORF contains the reference, or when the bases upstream of the ORF complete the reference's missing N-terminus\n- Loose hits with at least 95% identity become Strict"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify pre-bucketed hits, one reported tier per query
    Classify(classify::ClassifyArgs),

    /// Fetch and translate the flanking bases of an ORF
    Partial(partial::PartialArgs),

    /// Record the predicted ORF nucleotide sequences as JSON
    PredictedGenes(predicted::PredictedGenesArgs),
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    #[default]
    Json,
    Tsv,
}
