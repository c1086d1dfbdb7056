use std::path::PathBuf;

use clap::Parser;

use crate::cli::OutputFormat;
use crate::workflow::{PrebucketedWorkflow, Workflow, WorkflowError};

#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// JSON file of per-query perfect/strict/loose hit maps
    #[arg(long, required = true)]
    pub hits: PathBuf,

    /// Nucleotide FASTA the ORFs were predicted from (a .fai alongside enables random access)
    #[arg(long)]
    pub input_sequence: Option<PathBuf>,

    /// Report loose hits even when none could be nudged to Strict
    #[arg(long)]
    pub loose: bool,

    /// Model type id whose strict hits are never nudged (repeatable, adds to the config)
    #[arg(long)]
    pub exempt_model_type: Vec<u64>,

    /// JSON classifier config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

/// Execute classify subcommand
///
/// # Errors
///
/// Returns an error if the inputs are invalid, the hits cannot be parsed, or
/// any query fails to classify (results for the other queries are still
/// written).
pub fn run(args: ClassifyArgs, verbose: bool) -> anyhow::Result<()> {
    let mut workflow = PrebucketedWorkflow::from_args(args)?;
    workflow.run()?;

    if verbose {
        eprintln!("Reported hits for {} queries", workflow.results().len());
    }

    let failed = workflow.failed_queries();
    if !failed.is_empty() {
        return Err(WorkflowError::QueriesFailed(failed.len()).into());
    }

    Ok(())
}
