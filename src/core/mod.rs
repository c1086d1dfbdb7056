//! Core data types for hit classification.
//!
//! - [`Hit`]: one aligned candidate of a query against a reference model
//! - [`HitMap`]: the hits of one tier for a query, keyed by aligner hit id
//! - [`QueryResultSet`]: the perfect/strict/loose buckets of one query
//! - [`TierMatch`], [`Strand`], [`InputType`]: classification and coordinate types
//!
//! ## Tiers
//!
//! | Tier    | Meaning                                                   |
//! |---------|-----------------------------------------------------------|
//! | Perfect | identical to the curated reference sequence               |
//! | Strict  | passes the model's curated bit-score cutoff               |
//! | Loose   | below the cutoff, reported only on request or when nudged |
//!
//! A hit's tier only ever moves upward (`Loose -> Strict -> Perfect`), and only
//! through the nudge rules in [`crate::matching::nudge`].

pub mod hit;
pub mod types;

pub use hit::{Hit, HitMap, QueryResultSet};
pub use types::{InputType, Strand, TierMatch};
