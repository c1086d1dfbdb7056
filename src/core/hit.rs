use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::TierMatch;

/// Hits of one tier for a single query, keyed by aligner hit identifier
pub type HitMap = BTreeMap<String, Hit>;

/// One aligned candidate of a query against a reference model.
///
/// Field names follow the JSON produced by the upstream bucketing step.
/// Attributes this crate does not interpret are carried through untouched in
/// `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// Percent identity (0-100)
    pub perc_identity: f64,

    /// Tier tag, only ever moved upward by nudging
    pub type_match: TierMatch,

    /// Identifier of the reference model type
    pub model_type_id: u64,

    /// Curated reference protein sequence
    #[serde(default)]
    pub sequence_from_broadstreet: String,

    /// Translated query ORF protein sequence
    #[serde(default)]
    pub orf_prot_sequence: String,

    /// Aligned substring shared by query and reference
    #[serde(rename = "match", default)]
    pub matched: String,

    /// ORF identifier on its source contig/read (caller suffix included)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orf_from: Option<String>,

    /// 1-based ORF start coordinate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orf_start: Option<u64>,

    /// 1-based ORF end coordinate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orf_end: Option<u64>,

    /// `+` or `-`, kept raw until a fetch needs it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orf_strand: Option<String>,

    #[serde(rename = "ARO_name", default)]
    pub aro_name: String,

    /// Set once a nudge rule promoted this hit
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nudged: bool,

    /// Flanking nucleotides fetched to complete a missing terminus
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_bases: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Hit {
    pub fn new(perc_identity: f64, type_match: TierMatch, model_type_id: u64) -> Self {
        Self {
            perc_identity,
            type_match,
            model_type_id,
            sequence_from_broadstreet: String::new(),
            orf_prot_sequence: String::new(),
            matched: String::new(),
            orf_from: None,
            orf_start: None,
            orf_end: None,
            orf_strand: None,
            aro_name: String::new(),
            nudged: false,
            partial_bases: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Percent identity truncated toward zero, as used by tier thresholds
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // 0-100 by construction
    pub fn truncated_identity(&self) -> i64 {
        self.perc_identity.trunc() as i64
    }

    /// Move this hit up to `tier` and mark it nudged.
    ///
    /// Returns `false` and leaves the hit untouched when `tier` is not above
    /// the current tier.
    pub fn promote(&mut self, tier: TierMatch) -> bool {
        if tier <= self.type_match {
            return false;
        }
        self.type_match = tier;
        self.nudged = true;
        true
    }
}

/// Perfect, strict and loose hits of one query, as bucketed upstream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResultSet {
    #[serde(default)]
    pub perfect: HitMap,
    #[serde(default)]
    pub strict: HitMap,
    #[serde(default)]
    pub loose: HitMap,
}

impl QueryResultSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.perfect.is_empty() && self.strict.is_empty() && self.loose.is_empty()
    }
}
