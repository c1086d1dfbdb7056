//! # rgi-tiers
//!
//! A library for deciding which tier of antimicrobial-resistance hits to report
//! for each query sequence.
//!
//! An aligner compares predicted proteins against a curated database of
//! resistance-gene reference models and buckets every hit into one of three
//! tiers: **Perfect** (identical to the reference), **Strict** (passes the
//! model's curated cutoff) or **Loose** (below the cutoff). For every query
//! `rgi-tiers` reports exactly one tier, after nudging borderline hits upward
//! when the evidence supports it.
//!
//! ## Features
//!
//! - **Tier selection**: Perfect beats Strict beats Loose, one tier per query
//! - **Strict -> Perfect nudging**: ORFs that contain the full reference, or
//!   whose upstream bases complete a truncated N-terminus, are promoted
//! - **Loose -> Strict nudging**: loose hits with at least 95% identity are promoted
//! - **Partial sequence retrieval**: indexed or scanning FASTA access to the
//!   flanking bases of an ORF
//! - **Bacterial translation**: genetic code table 11 with IUPAC ambiguity codes
//! - **Header field extraction**: `|`-delimited database headers and
//!   `#`-delimited Prodigal ORF headers
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
//! let mut strict = HitMap::new();
//! let mut hit = Hit::new(100.0, TierMatch::Strict, 40292);
//! hit.sequence_from_broadstreet = "MKTAYIAK".to_string();
//! hit.orf_prot_sequence = "MKTAYIAKQR".to_string();
//! hit.matched = "MKTAYIAK".to_string();
//! strict.insert("hit_1".to_string(), hit);
//!
//! let set = QueryResultSet { strict, ..Default::default() };
//! let result = classifier.classify("contig_1_3", set).unwrap().unwrap();
//! assert!(result.nudged);
//! assert_eq!(result.hits["hit_1"].type_match, TierMatch::Perfect);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Hit, tier and strand types
//! - [`parsing`]: Header field extraction, gap handling and FASTA readers
//! - [`sequence`]: Partial sequence retrieval and translation
//! - [`matching`]: The hit classifier and nudge rules
//! - [`workflow`]: End-to-end classification workflows
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod sequence;
pub mod workflow;

// Re-export commonly used types for convenience
pub use core::hit::{Hit, HitMap, QueryResultSet};
pub use core::types::*;
pub use matching::classifier::{Classification, ClassifierConfig, HitClassifier, ResultMap};
pub use parsing::fields::{extract_nth_bar, extract_nth_hash, FieldValue};
pub use parsing::gaps::find_num_dash;
pub use sequence::fetch::{get_part_sequence, FastaFile, SequenceSource};
pub use workflow::{PrebucketedWorkflow, Workflow};
