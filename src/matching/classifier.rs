use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::hit::{HitMap, QueryResultSet};
use crate::core::types::TierMatch;
use crate::matching::nudge::{nudge_loose_to_strict, nudge_strict_to_perfect, NudgeError};
use crate::sequence::fetch::SequenceSource;

/// Model type id of protein variant models, which are never nudged by default
pub const PROTEIN_VARIANT_MODEL_TYPE_ID: u64 = 40295;

/// Reported hits keyed by query id
pub type ResultMap = BTreeMap<String, HitMap>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Configuration for the hit classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Report loose hits even when none of them could be nudged to strict
    pub loose: bool,

    /// Model types whose strict hits are never promoted to perfect
    pub nudge_exempt_model_types: BTreeSet<u64>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            loose: false,
            nudge_exempt_model_types: BTreeSet::from([PROTEIN_VARIANT_MODEL_TYPE_ID]),
        }
    }
}

impl ClassifierConfig {
    /// Load config from a JSON file; absent keys keep their defaults
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Outcome of classifying one query
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Bucket the reported hits came from
    pub tier: TierMatch,

    /// Whether a nudge rule promoted any of the reported hits
    pub nudged: bool,

    pub hits: HitMap,
}

/// Picks the single tier to report for each query
pub struct HitClassifier<'a> {
    config: &'a ClassifierConfig,
    source: &'a dyn SequenceSource,
}

impl<'a> HitClassifier<'a> {
    /// `source` supplies the nucleotides used to complete strict hits with a
    /// missing N-terminus.
    pub fn new(config: &'a ClassifierConfig, source: &'a dyn SequenceSource) -> Self {
        Self { config, source }
    }

    /// Decide which hits to report for one query.
    ///
    /// 1. Any perfect hits are reported as they are.
    /// 2. Otherwise strict hits are reported after the strict -> perfect nudge.
    /// 3. Otherwise loose hits go through the loose -> strict nudge and are
    ///    reported if the nudge promoted something or `loose` is set.
    /// 4. Otherwise nothing is reported.
    ///
    /// # Errors
    ///
    /// Propagates `NudgeError` from the strict -> perfect nudge.
    pub fn classify(
        &self,
        query_id: &str,
        set: QueryResultSet,
    ) -> Result<Option<Classification>, NudgeError> {
        let QueryResultSet {
            perfect,
            strict,
            loose,
        } = set;

        if !perfect.is_empty() {
            return Ok(Some(Classification {
                tier: TierMatch::Perfect,
                nudged: false,
                hits: perfect,
            }));
        }

        if !strict.is_empty() {
            let (nudged, strict) = nudge_strict_to_perfect(
                strict,
                &self.config.nudge_exempt_model_types,
                self.source,
            )?;
            return Ok(Some(Classification {
                tier: TierMatch::Strict,
                nudged,
                hits: strict,
            }));
        }

        if !loose.is_empty() {
            let (nudged, loose) = nudge_loose_to_strict(loose);
            if (nudged && !self.config.loose) || self.config.loose {
                return Ok(Some(Classification {
                    tier: TierMatch::Loose,
                    nudged,
                    hits: loose,
                }));
            }
            debug!("Dropping {} loose hits for {query_id}", loose.len());
        }

        Ok(None)
    }

    /// Classify one query and record its reported hits in `results`.
    ///
    /// Nothing is recorded when no tier is reported.
    ///
    /// # Errors
    ///
    /// See [`HitClassifier::classify`].
    pub fn results(
        &self,
        results: &mut ResultMap,
        query_id: &str,
        set: QueryResultSet,
    ) -> Result<(), NudgeError> {
        if let Some(classification) = self.classify(query_id, set)? {
            debug!(
                tier = %classification.tier,
                nudged = classification.nudged,
                "Reporting {} hits for {query_id}",
                classification.hits.len()
            );
            results.insert(query_id.to_string(), classification.hits);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hit::Hit;
    use std::collections::HashMap;

    const REFERENCE: &str = "MKTAYIAKQRQISFVKSHFSRQLEERLGLIEVQAPILSRVGDGTQDNLSGAEKGVQGFGR";

    fn hits(entries: &[(&str, Hit)]) -> HitMap {
        entries
            .iter()
            .map(|(id, hit)| ((*id).to_string(), hit.clone()))
            .collect()
    }

    fn contained_strict_hit() -> Hit {
        let mut hit = Hit::new(100.0, TierMatch::Strict, 40292);
        hit.sequence_from_broadstreet = REFERENCE.to_string();
        hit.orf_prot_sequence = format!("MA{REFERENCE}");
        hit.matched = REFERENCE.to_string();
        hit
    }

    fn no_sequences() -> HashMap<String, String> {
        HashMap::new()
    }

    #[test]
    fn test_perfect_wins_without_nudging() {
        let config = ClassifierConfig::default();
        let source = no_sequences();
        let classifier = HitClassifier::new(&config, &source);

        let perfect = hits(&[("p", Hit::new(100.0, TierMatch::Perfect, 40292))]);
        let strict = hits(&[("s", contained_strict_hit())]);

        let set = QueryResultSet {
            perfect: perfect.clone(),
            strict,
            loose: HitMap::new(),
        };

        let result = classifier.classify("q1", set).unwrap().unwrap();
        assert_eq!(result.tier, TierMatch::Perfect);
        assert!(!result.nudged);
        assert_eq!(result.hits, perfect);
    }

    #[test]
    fn test_strict_is_nudged_and_reported() {
        let config = ClassifierConfig::default();
        let source = no_sequences();
        let classifier = HitClassifier::new(&config, &source);

        let set = QueryResultSet {
            strict: hits(&[("s", contained_strict_hit())]),
            loose: hits(&[("l", Hit::new(99.0, TierMatch::Loose, 40292))]),
            ..Default::default()
        };

        let result = classifier.classify("q1", set).unwrap().unwrap();
        assert_eq!(result.tier, TierMatch::Strict);
        assert!(result.nudged);
        assert_eq!(result.hits["s"].type_match, TierMatch::Perfect);
        assert!(!result.hits.contains_key("l"));
    }

    #[test]
    fn test_strict_reported_even_without_nudge() {
        let config = ClassifierConfig::default();
        let source = no_sequences();
        let classifier = HitClassifier::new(&config, &source);

        let mut hit = contained_strict_hit();
        hit.perc_identity = 98.0;
        let set = QueryResultSet {
            strict: hits(&[("s", hit)]),
            ..Default::default()
        };

        let result = classifier.classify("q1", set).unwrap().unwrap();
        assert!(!result.nudged);
        assert_eq!(result.hits["s"].type_match, TierMatch::Strict);
    }

    #[test]
    fn test_exempt_model_types_come_from_config() {
        let config = ClassifierConfig {
            nudge_exempt_model_types: BTreeSet::from([40292]),
            ..Default::default()
        };
        let source = no_sequences();
        let classifier = HitClassifier::new(&config, &source);

        let set = QueryResultSet {
            strict: hits(&[("s", contained_strict_hit())]),
            ..Default::default()
        };

        let result = classifier.classify("q1", set).unwrap().unwrap();
        assert!(!result.nudged);
        assert_eq!(result.hits["s"].type_match, TierMatch::Strict);
    }

    #[test]
    fn test_unpromotable_loose_dropped_unless_loose_enabled() {
        let source = no_sequences();
        let set = QueryResultSet {
            loose: hits(&[("l", Hit::new(60.0, TierMatch::Loose, 40292))]),
            ..Default::default()
        };

        let config = ClassifierConfig::default();
        let classifier = HitClassifier::new(&config, &source);
        assert!(classifier.classify("q1", set.clone()).unwrap().is_none());

        let config = ClassifierConfig {
            loose: true,
            ..Default::default()
        };
        let classifier = HitClassifier::new(&config, &source);
        let result = classifier.classify("q1", set).unwrap().unwrap();
        assert_eq!(result.tier, TierMatch::Loose);
        assert!(!result.nudged);
        assert_eq!(result.hits["l"].type_match, TierMatch::Loose);
    }

    #[test]
    fn test_nudged_loose_reported_by_default() {
        let config = ClassifierConfig::default();
        let source = no_sequences();
        let classifier = HitClassifier::new(&config, &source);

        let set = QueryResultSet {
            loose: hits(&[
                ("high", Hit::new(96.5, TierMatch::Loose, 40292)),
                ("low", Hit::new(40.0, TierMatch::Loose, 40292)),
            ]),
            ..Default::default()
        };

        let result = classifier.classify("q1", set).unwrap().unwrap();
        assert!(result.nudged);
        assert_eq!(result.hits.len(), 2);
        assert_eq!(result.hits["high"].type_match, TierMatch::Strict);
        assert_eq!(result.hits["low"].type_match, TierMatch::Loose);
    }

    #[test]
    fn test_results_records_only_reported_queries() {
        let config = ClassifierConfig::default();
        let source = no_sequences();
        let classifier = HitClassifier::new(&config, &source);
        let mut results = ResultMap::new();

        classifier
            .results(&mut results, "empty", QueryResultSet::default())
            .unwrap();
        classifier
            .results(
                &mut results,
                "dropped",
                QueryResultSet {
                    loose: hits(&[("l", Hit::new(50.0, TierMatch::Loose, 40292))]),
                    ..Default::default()
                },
            )
            .unwrap();
        classifier
            .results(
                &mut results,
                "kept",
                QueryResultSet {
                    perfect: hits(&[("p", Hit::new(100.0, TierMatch::Perfect, 40292))]),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(results.keys().collect::<Vec<_>>(), vec!["kept"]);
    }

    #[test]
    fn test_results_logs_reported_tier() {
        use std::sync::{Arc, Mutex};

        let logs = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&logs);
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .with_writer(move || LogSink(Arc::clone(&sink)))
            .finish();

        let config = ClassifierConfig::default();
        let source = no_sequences();
        let classifier = HitClassifier::new(&config, &source);
        let mut results = ResultMap::new();

        tracing::subscriber::with_default(subscriber, || {
            classifier
                .results(
                    &mut results,
                    "q1",
                    QueryResultSet {
                        strict: hits(&[("s", contained_strict_hit())]),
                        ..Default::default()
                    },
                )
                .unwrap();
        });

        let logs = String::from_utf8(logs.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("Reporting 1 hits for q1"));
        assert!(logs.contains("tier=Strict"));
        assert!(logs.contains("nudged=true"));
    }

    struct LogSink(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_config_defaults_and_json() {
        let config = ClassifierConfig::default();
        assert!(!config.loose);
        assert!(config.nudge_exempt_model_types.contains(&40295));

        let config = ClassifierConfig::from_json(r#"{"loose": true}"#).unwrap();
        assert!(config.loose);
        assert_eq!(
            config.nudge_exempt_model_types,
            BTreeSet::from([PROTEIN_VARIANT_MODEL_TYPE_ID])
        );

        let config =
            ClassifierConfig::from_json(r#"{"nudge_exempt_model_types": [40293, 40295]}"#).unwrap();
        assert_eq!(config.nudge_exempt_model_types.len(), 2);

        assert!(ClassifierConfig::from_json("{").is_err());
    }
}
