//! Translation between ungapped and gapped alignment coordinates.

/// Count the gap characters (`-`) seen in `subject` before `index` non-gap
/// characters have been collected.
///
/// Scanning stops as soon as the `index`th residue is reached, so gaps after
/// it are not counted.
#[must_use]
pub fn find_num_dash(subject: &str, index: usize) -> usize {
    let mut dash_count = 0;
    let mut residues = 0;

    for c in subject.chars() {
        if c == '-' {
            dash_count += 1;
        } else {
            residues += 1;
        }
        if residues == index {
            break;
        }
    }

    dash_count
}

/// Position of the `index`th residue (1-based) within the gapped `subject`.
///
/// Used to locate a mutation in the raw aligned subject string.
#[must_use]
pub fn gapped_position(subject: &str, index: usize) -> usize {
    index + find_num_dash(subject, index)
}
