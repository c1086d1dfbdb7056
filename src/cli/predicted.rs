use std::path::PathBuf;

use clap::Args;

use crate::core::types::InputType;
use crate::parsing::fasta::{get_orf_dna_sequence, predicted_genes_path};

#[derive(Args, Debug)]
pub struct PredictedGenesArgs {
    /// Submitted nucleotide file the ORFs were predicted from
    #[arg(long, required = true)]
    pub input_sequence: PathBuf,

    /// Kind of submitted sequence
    #[arg(long, value_enum, default_value = "contig")]
    pub input_type: InputType,

    /// Directory holding the ORF caller's working files
    #[arg(short = 'w', long, default_value = ".")]
    pub working_directory: PathBuf,
}

/// Execute predicted-genes subcommand
///
/// # Errors
///
/// Returns an error if the ORF FASTA cannot be parsed or the JSON cannot be
/// written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: PredictedGenesArgs, verbose: bool) -> anyhow::Result<()> {
    let genes = get_orf_dna_sequence(
        &args.input_sequence,
        args.input_type.as_str(),
        &args.working_directory,
    )?;
    let json_path = predicted_genes_path(&args.input_sequence, &args.working_directory);

    if verbose {
        for (name, sequence) in &genes {
            eprintln!("{name}\t{} bp", sequence.len());
        }
    }

    println!("{} predicted genes written to {}", genes.len(), json_path.display());

    Ok(())
}
