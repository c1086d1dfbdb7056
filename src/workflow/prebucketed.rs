//! Workflow for hits that were aligned and bucketed upstream.
//!
//! The input is a JSON object keyed by query id, each value holding the
//! `perfect`, `strict` and `loose` hit maps for that query:
//!
//! ```json
//! {
//!   "contig_1_3": {
//!     "perfect": {},
//!     "strict": { "gnl|BL_ORD_ID|41|hsp_num:0": { "perc_identity": 100.0, ... } },
//!     "loose": {}
//!   }
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use tracing::{error, info};

use crate::cli::classify::ClassifyArgs;
use crate::cli::OutputFormat;
use crate::core::hit::QueryResultSet;
use crate::matching::{ClassifierConfig, HitClassifier, ResultMap};
use crate::sequence::fetch::{FastaFile, SequenceSource};
use crate::workflow::{Workflow, WorkflowError};

pub struct PrebucketedWorkflow {
    hits: PathBuf,
    input_sequence: Option<PathBuf>,
    output: Option<PathBuf>,
    format: OutputFormat,
    config: ClassifierConfig,
    queries: BTreeMap<String, QueryResultSet>,
    query_count: usize,
    results: ResultMap,
    failed: Vec<String>,
}

impl PrebucketedWorkflow {
    #[must_use]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Reported hits per query, filled by `filter_process`
    #[must_use]
    pub fn results(&self) -> &ResultMap {
        &self.results
    }

    /// Queries whose classification raised an error
    #[must_use]
    pub fn failed_queries(&self) -> &[String] {
        &self.failed
    }

    fn write_results(&self, writer: &mut dyn Write) -> Result<(), WorkflowError> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *writer, &self.results)?;
                writeln!(writer)?;
            }
            OutputFormat::Tsv => {
                writeln!(
                    writer,
                    "query_id\thit_id\taro_name\tmodel_type_id\ttype_match\tperc_identity\tnudged"
                )?;
                for (query_id, hits) in &self.results {
                    for (hit_id, hit) in hits {
                        writeln!(
                            writer,
                            "{query_id}\t{hit_id}\t{}\t{}\t{}\t{:.2}\t{}",
                            hit.aro_name,
                            hit.model_type_id,
                            hit.type_match,
                            hit.perc_identity,
                            hit.nudged
                        )?;
                    }
                }
            }
            OutputFormat::Text => {
                writeln!(writer, "Classification Results")?;
                writeln!(writer, "{}", "=".repeat(60))?;
                writeln!(
                    writer,
                    "{} of {} queries reported",
                    self.results.len(),
                    self.query_count
                )?;

                for (query_id, hits) in &self.results {
                    writeln!(writer, "\n{query_id}")?;
                    for (hit_id, hit) in hits {
                        let nudged = if hit.nudged { " (nudged)" } else { "" };
                        writeln!(
                            writer,
                            "  {:<8} {:.2}%  {}  [{hit_id}]{nudged}",
                            hit.type_match, hit.perc_identity, hit.aro_name
                        )?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl Workflow for PrebucketedWorkflow {
    type Args = ClassifyArgs;

    fn from_args(args: ClassifyArgs) -> Result<Self, WorkflowError> {
        let mut config = match &args.config {
            Some(path) => ClassifierConfig::load_from_file(path)?,
            None => ClassifierConfig::default(),
        };
        if args.loose {
            config.loose = true;
        }
        config
            .nudge_exempt_model_types
            .extend(args.exempt_model_type.iter().copied());

        Ok(Self {
            hits: args.hits,
            input_sequence: args.input_sequence,
            output: args.output,
            format: args.format,
            config,
            queries: BTreeMap::new(),
            query_count: 0,
            results: ResultMap::new(),
            failed: Vec::new(),
        })
    }

    fn validate_inputs(&self) -> Result<(), WorkflowError> {
        if !self.hits.is_file() {
            return Err(WorkflowError::InvalidInput(format!(
                "Hits file not found: {}",
                self.hits.display()
            )));
        }
        if let Some(path) = &self.input_sequence {
            if !path.is_file() {
                return Err(WorkflowError::InvalidInput(format!(
                    "Input sequence file not found: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    fn run_alignment(&mut self) -> Result<(), WorkflowError> {
        let reader = BufReader::new(File::open(&self.hits)?);
        self.queries = serde_json::from_reader(reader)?;
        self.query_count = self.queries.len();
        info!(
            "Loaded hits for {} queries from {}",
            self.queries.len(),
            self.hits.display()
        );
        Ok(())
    }

    fn filter_process(&mut self) -> Result<(), WorkflowError> {
        let no_sequences: HashMap<String, String> = HashMap::new();
        let fasta = self.input_sequence.as_ref().map(FastaFile::new);
        let source: &dyn SequenceSource = match &fasta {
            Some(fasta) => fasta,
            None => &no_sequences,
        };

        let classifier = HitClassifier::new(&self.config, source);
        let mut results = ResultMap::new();
        let mut failed = Vec::new();

        for (query_id, set) in std::mem::take(&mut self.queries) {
            if let Err(e) = classifier.results(&mut results, &query_id, set) {
                error!("Failed to classify {query_id}: {e}");
                failed.push(query_id);
            }
        }

        info!(
            "Reported hits for {} of {} queries",
            results.len(),
            self.query_count
        );
        self.results = results;
        self.failed = failed;
        Ok(())
    }

    fn output(&self) -> Result<(), WorkflowError> {
        match &self.output {
            Some(path) => {
                let mut writer = BufWriter::new(File::create(path)?);
                self.write_results(&mut writer)?;
                writer.flush()?;
            }
            None => {
                let stdout = std::io::stdout();
                let mut writer = stdout.lock();
                self.write_results(&mut writer)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HITS: &str = r#"{
        "orf_1": {
            "perfect": {},
            "strict": {},
            "loose": {
                "h1": {"perc_identity": 96.0, "type_match": "Loose", "model_type_id": 40292, "ARO_name": "OXA-48"}
            }
        },
        "orf_2": {
            "loose": {
                "h2": {"perc_identity": 41.0, "type_match": "Loose", "model_type_id": 40292, "ARO_name": "vanA"}
            }
        }
    }"#;

    fn workflow_in(dir: &TempDir, extra: &str) -> PrebucketedWorkflow {
        let hits = dir.path().join("hits.json");
        std::fs::write(&hits, HITS).unwrap();
        let out = dir.path().join("out.json");
        PrebucketedWorkflow::from_string(&format!(
            "--hits {} -o {} {extra}",
            hits.display(),
            out.display()
        ))
        .unwrap()
    }

    #[test]
    fn test_from_string_applies_flags() {
        let dir = TempDir::new().unwrap();
        let workflow = workflow_in(&dir, "--loose --exempt-model-type 41091");

        assert!(workflow.config().loose);
        assert!(workflow.config().nudge_exempt_model_types.contains(&41091));
        assert!(workflow.config().nudge_exempt_model_types.contains(&40295));
    }

    #[test]
    fn test_from_string_rejects_unknown_flags() {
        let result = PrebucketedWorkflow::from_string("--hits x.json --bogus");
        assert!(matches!(result, Err(WorkflowError::Args(_))));
    }

    #[test]
    fn test_run_writes_reported_queries() {
        let dir = TempDir::new().unwrap();
        let mut workflow = workflow_in(&dir, "");
        workflow.run().unwrap();

        assert!(workflow.failed_queries().is_empty());
        assert_eq!(workflow.results().len(), 1);
        assert!(workflow.results()["orf_1"]["h1"].nudged);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("out.json")).unwrap())
                .unwrap();
        assert_eq!(written["orf_1"]["h1"]["type_match"], "Strict");
        assert!(written.get("orf_2").is_none());
    }

    #[test]
    fn test_run_with_loose_reports_everything() {
        let dir = TempDir::new().unwrap();
        let mut workflow = workflow_in(&dir, "--loose");
        workflow.run().unwrap();

        assert_eq!(workflow.results().len(), 2);
        assert_eq!(
            workflow.results()["orf_2"]["h2"].type_match,
            crate::core::types::TierMatch::Loose
        );
    }

    #[test]
    fn test_validate_inputs_missing_files() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        let workflow =
            PrebucketedWorkflow::from_string(&format!("--hits {}", missing.display())).unwrap();
        assert!(matches!(
            workflow.validate_inputs(),
            Err(WorkflowError::InvalidInput(_))
        ));

        let workflow = workflow_in(&dir, &format!("--input-sequence {}", missing.display()));
        assert!(matches!(
            workflow.validate_inputs(),
            Err(WorkflowError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_failed_query_is_recorded_and_others_continue() {
        let dir = TempDir::new().unwrap();
        let hits = dir.path().join("hits.json");
        std::fs::write(
            &hits,
            r#"{
                "bad": {"strict": {"s": {
                    "perc_identity": 100.0, "type_match": "Strict", "model_type_id": 40292,
                    "sequence_from_broadstreet": "MKTAYIAK", "orf_prot_sequence": "AYIAK", "match": "AYIAK"
                }}},
                "good": {"perfect": {"p": {"perc_identity": 100.0, "type_match": "Perfect", "model_type_id": 40292}}}
            }"#,
        )
        .unwrap();

        let mut workflow = PrebucketedWorkflow::from_string(&format!(
            "--hits {} -o {}",
            hits.display(),
            dir.path().join("out.tsv").display()
        ))
        .unwrap();
        workflow.run().unwrap();

        assert_eq!(workflow.failed_queries(), ["bad".to_string()]);
        assert!(workflow.results().contains_key("good"));
    }

    #[test]
    fn test_tsv_output() {
        let dir = TempDir::new().unwrap();
        let mut workflow = workflow_in(&dir, "--format tsv");
        workflow.run_alignment().unwrap();
        workflow.filter_process().unwrap();

        let mut buffer = Vec::new();
        workflow.write_results(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("query_id\thit_id"));
        assert_eq!(lines[1], "orf_1\th1\tOXA-48\t40292\tStrict\t96.00\ttrue");
    }
}
