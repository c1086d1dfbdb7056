use std::path::PathBuf;

use clap::Args;

use crate::matching::nudge::normalize_start_codon;
use crate::parsing::orf::OrfCoordinates;
use crate::sequence::fetch::{get_part_sequence, FastaFile};
use crate::sequence::translate::translate_on_strand;

#[derive(Args, Debug)]
pub struct PartialArgs {
    /// Nucleotide FASTA the ORF was predicted from
    #[arg(long, required = true)]
    pub input_sequence: PathBuf,

    /// Prodigal ORF header, e.g. "contig_1_2 # 1201 # 2061 # 1 # ID=1_2"
    #[arg(long, required = true)]
    pub orf: String,

    /// Number of flanking nucleotides to fetch
    #[arg(short, long, required = true)]
    pub length: u64,
}

/// Execute partial subcommand
///
/// # Errors
///
/// Returns an error if the ORF header cannot be parsed or the fetch fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: PartialArgs, verbose: bool) -> anyhow::Result<()> {
    let orf = OrfCoordinates::from_header(&args.orf)?;
    let source = FastaFile::new(&args.input_sequence);

    let bases = get_part_sequence(
        &source,
        &orf.orf_from,
        orf.start,
        orf.end,
        args.length,
        orf.strand.symbol(),
        &orf.orf_from,
    )?;
    let protein = translate_on_strand(&bases, orf.strand);

    if verbose {
        eprintln!(
            "{} {}..{} ({}), {} flanking bases",
            orf.orf_from, orf.start, orf.end, orf.strand, args.length
        );
    }

    println!("bases\t{bases}");
    println!("protein\t{protein}");
    println!("start_normalized\t{}", normalize_start_codon(&protein));

    Ok(())
}
