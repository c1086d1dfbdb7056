//! Rules that promote borderline hits to a higher tier.
//!
//! Both rules take ownership of a tier's [`HitMap`], promote eligible hits in
//! place, and hand the map back together with whether anything was promoted.
//!
//! - **Strict -> Perfect**: a 100% identity strict hit is perfect when the ORF
//!   fully contains the reference, or when the nucleotides upstream of the ORF
//!   translate into exactly the reference's missing N-terminus (alternate
//!   start codons read as `M`).
//! - **Loose -> Strict**: a loose hit with at least 95% identity is strict.

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::hit::{Hit, HitMap};
use crate::core::types::{InvalidStrand, Strand, TierMatch};
use crate::sequence::fetch::{get_part_sequence, FetchError, SequenceSource};
use crate::sequence::translate::translate_on_strand;

/// Residues an alternate bacterial start codon can translate to
pub const START_RESIDUES: [char; 4] = ['L', 'M', 'I', 'V'];

/// Lowest truncated percent identity for a loose hit to become strict
pub const LOOSE_TO_STRICT_MIN_IDENTITY: i64 = 95;

#[derive(Error, Debug)]
pub enum NudgeError {
    #[error("Failed to fetch partial sequence: {0}")]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    InvalidStrand(#[from] InvalidStrand),

    #[error("Hit '{0}' has no ORF coordinates to complete its N-terminus from")]
    MissingOrfCoordinates(String),
}

/// How the ORF protein relates to the reference protein
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Containment {
    /// ORF is shorter and lies inside the reference
    QueryInReference,
    /// Reference lies inside a longer ORF
    ReferenceInQuery,
    /// Neither contains the other
    Overlapping,
    /// Identical, or a same-length mismatch
    Other,
}

impl Containment {
    fn of(query: &str, reference: &str) -> Self {
        if query.len() < reference.len() && reference.contains(query) {
            Self::QueryInReference
        } else if query.len() > reference.len() && query.contains(reference) {
            Self::ReferenceInQuery
        } else if !query.contains(reference) && !reference.contains(query) {
            Self::Overlapping
        } else {
            Self::Other
        }
    }
}

/// Read the translated upstream bases as an N-terminus.
///
/// A leading start residue (`L`, `M`, `I`, `V`) becomes `M` and the rest is
/// kept. Without a start residue only the first residue is kept, so the
/// completed protein cannot match a reference that begins with a longer
/// start-less stretch.
#[must_use]
pub fn normalize_start_codon(protein: &str) -> String {
    match protein.chars().next() {
        Some(first) if START_RESIDUES.contains(&first) => format!("M{}", &protein[1..]),
        Some(first) => first.to_string(),
        None => String::new(),
    }
}

/// Promote strict hits with a missing N-terminus or a contained reference to
/// perfect.
///
/// Only hits at exactly 100% (truncated) identity, still tagged strict, and
/// whose model type is not in `exempt_model_types` are considered.
///
/// # Errors
///
/// Returns `NudgeError` when a hit needs its N-terminus completed but has no
/// ORF coordinates, has an invalid strand, or the fetch fails for a reason
/// other than running off the start of the contig.
pub fn nudge_strict_to_perfect(
    mut strict: HitMap,
    exempt_model_types: &BTreeSet<u64>,
    source: &dyn SequenceSource,
) -> Result<(bool, HitMap), NudgeError> {
    let mut nudged = false;

    for (id, hit) in &mut strict {
        if hit.truncated_identity() != 100
            || hit.type_match != TierMatch::Strict
            || exempt_model_types.contains(&hit.model_type_id)
        {
            continue;
        }

        match Containment::of(&hit.orf_prot_sequence, &hit.sequence_from_broadstreet) {
            Containment::QueryInReference => {
                if let Some(partial_bases) = complete_n_terminus(id, hit, source)? {
                    info!("Missing n-terminus push to Perfect: {}", hit.aro_name);
                    hit.promote(TierMatch::Perfect);
                    hit.partial_bases = Some(partial_bases);
                    nudged = true;
                }
            }
            Containment::ReferenceInQuery => {
                info!(
                    "Reference contained within open reading frame push to Perfect: {}",
                    hit.aro_name
                );
                hit.promote(TierMatch::Perfect);
                nudged = true;
            }
            Containment::Overlapping => {
                // TODO: decide whether partially overlapping ORFs can ever be promoted
                warn!(
                    "ORF and reference are overlapping, left as Strict: {}",
                    hit.aro_name
                );
            }
            Containment::Other => {}
        }
    }

    Ok((nudged, strict))
}

/// Fetch and translate the bases upstream of the ORF.
///
/// Returns the fetched bases when they complete the reference exactly.
fn complete_n_terminus(
    id: &str,
    hit: &Hit,
    source: &dyn SequenceSource,
) -> Result<Option<String>, NudgeError> {
    let (Some(orf_from), Some(start), Some(end), Some(strand)) = (
        hit.orf_from.as_deref(),
        hit.orf_start,
        hit.orf_end,
        hit.orf_strand.as_deref(),
    ) else {
        return Err(NudgeError::MissingOrfCoordinates(id.to_string()));
    };

    let missing_residues = hit
        .sequence_from_broadstreet
        .len()
        .saturating_sub(hit.matched.len());
    let length = (missing_residues * 3) as u64;

    let partial_bases = match get_part_sequence(
        source,
        orf_from,
        start,
        end,
        length,
        strand,
        &hit.aro_name,
    ) {
        Ok(bases) => bases,
        Err(FetchError::OutOfBounds { name, start, .. }) => {
            warn!(
                "Cannot complete {}: {name} has no bases before position {start}",
                hit.aro_name
            );
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    info!("Missing part: {partial_bases}");

    let strand = Strand::parse(strand)?;
    let partial_protein = translate_on_strand(&partial_bases, strand);
    debug!(strand = %strand, "Translated protein: {partial_protein}");

    let combined = normalize_start_codon(&partial_protein) + &hit.matched;

    Ok((combined == hit.sequence_from_broadstreet).then_some(partial_bases))
}

/// Promote loose hits with at least 95% (truncated) identity to strict.
///
/// Hits already above loose are left alone, so a second pass changes nothing.
#[must_use]
pub fn nudge_loose_to_strict(mut loose: HitMap) -> (bool, HitMap) {
    let mut nudged = false;

    for hit in loose.values_mut() {
        if hit.type_match != TierMatch::Loose {
            continue;
        }
        if (LOOSE_TO_STRICT_MIN_IDENTITY..=100).contains(&hit.truncated_identity()) {
            info!(
                "Loose hit with at least 95 percent identity push to Strict: {}",
                hit.aro_name
            );
            nudged |= hit.promote(TierMatch::Strict);
        }
    }

    (nudged, loose)
}
