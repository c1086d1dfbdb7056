//! Hit classification and tier promotion.
//!
//! - [`HitClassifier`]: picks the single tier reported for a query
//! - [`nudge`]: the strict -> perfect and loose -> strict promotion rules
//! - [`ClassifierConfig`]: the `loose` reporting flag and nudge-exempt model types
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use rgi_tiers::{ClassifierConfig, Hit, HitClassifier, HitMap, QueryResultSet, TierMatch};
//!
//! let config = ClassifierConfig::default();
//! let sequences: HashMap<String, String> = HashMap::new();
//! let classifier = HitClassifier::new(&config, &sequences);
//!
//! let mut loose = HitMap::new();
//! loose.insert("hit_1".to_string(), Hit::new(97.0, TierMatch::Loose, 40292));
//!
//! let set = QueryResultSet { loose, ..Default::default() };
//! let result = classifier.classify("orf_1", set).unwrap().unwrap();
//! assert_eq!(result.hits["hit_1"].type_match, TierMatch::Strict);
//! ```

pub mod classifier;
pub mod nudge;

pub use classifier::{
    Classification, ClassifierConfig, ConfigError, HitClassifier, ResultMap,
    PROTEIN_VARIANT_MODEL_TYPE_ID,
};
pub use nudge::{nudge_loose_to_strict, nudge_strict_to_perfect, NudgeError};
