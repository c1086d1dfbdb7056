//! End-to-end workflows around the hit classifier.
//!
//! Each way of producing hits (different aligners, contig or read input)
//! is a type implementing [`Workflow`]. Steps that belong to external tools
//! default to no-ops.

use thiserror::Error;

use crate::matching::{ConfigError, NudgeError};
use crate::parsing::ParseError;

pub mod prebucketed;

pub use prebucketed::PrebucketedWorkflow;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Args(#[from] clap::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse hits: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Nudge(#[from] NudgeError),

    #[error("{0} queries could not be classified")]
    QueriesFailed(usize),
}

/// Operations every classification workflow provides
pub trait Workflow: Sized {
    type Args: clap::Parser;

    /// Build the workflow from parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError` if the arguments cannot be turned into a workflow.
    fn from_args(args: Self::Args) -> Result<Self, WorkflowError>;

    /// Build the workflow from a whitespace-separated argument string.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Args` if the arguments do not parse.
    fn from_string(arguments: &str) -> Result<Self, WorkflowError> {
        let argv = std::iter::once("rgi-tiers").chain(arguments.split_whitespace());
        let args = <Self::Args as clap::Parser>::try_parse_from(argv)?;
        Self::from_args(args)
    }

    /// Check that the inputs exist and are usable.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidInput` describing the first problem found.
    fn validate_inputs(&self) -> Result<(), WorkflowError>;

    /// Build any reference databases the aligner needs.
    ///
    /// # Errors
    ///
    /// Implementation specific.
    fn create_databases(&mut self) -> Result<(), WorkflowError> {
        Ok(())
    }

    /// Produce the per-query perfect/strict/loose buckets.
    ///
    /// # Errors
    ///
    /// Implementation specific.
    fn run_alignment(&mut self) -> Result<(), WorkflowError>;

    /// Classify every query.
    ///
    /// # Errors
    ///
    /// Implementation specific.
    fn filter_process(&mut self) -> Result<(), WorkflowError>;

    /// Write the classified results.
    ///
    /// # Errors
    ///
    /// Implementation specific.
    fn output(&self) -> Result<(), WorkflowError>;

    /// Run every step in order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a step.
    fn run(&mut self) -> Result<(), WorkflowError> {
        self.validate_inputs()?;
        self.create_databases()?;
        self.run_alignment()?;
        self.filter_process()?;
        self.output()
    }
}
