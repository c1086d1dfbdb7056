//! Nucleotide to protein translation with NCBI genetic code tables.
//!
//! Only the bacterial, archaeal and plant plastid code (table 11) is needed by
//! the nudge rules, so it is the only table shipped here.

use bio::alphabets::dna;

use crate::core::types::Strand;

/// NCBI id of the bacterial, archaeal and plant plastid genetic code
pub const BACTERIAL_TABLE_ID: u8 = 11;

/// Amino acids in NCBI codon order (TTT, TTC, TTA, TTG, TCT, ...)
const TABLE_11: &[u8; 64] = b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

/// A genetic code table for translating codons to amino acids
#[derive(Debug, Clone, Copy)]
pub struct GeneticCode {
    /// NCBI genetic code ID
    pub id: u8,
    pub name: &'static str,
    amino_acids: &'static [u8; 64],
}

impl GeneticCode {
    /// Genetic code table 11
    #[must_use]
    pub const fn bacterial() -> Self {
        Self {
            id: BACTERIAL_TABLE_ID,
            name: "Bacterial, Archaeal and Plant Plastid",
            amino_acids: TABLE_11,
        }
    }

    fn lookup(&self, b1: u8, b2: u8, b3: u8) -> u8 {
        self.amino_acids[base_index(b1) * 16 + base_index(b2) * 4 + base_index(b3)]
    }

    /// Translate a single codon.
    ///
    /// IUPAC ambiguity codes are expanded; the codon translates to a residue
    /// only if every expansion agrees on it, otherwise to `X`. Anything that
    /// is not a nucleotide code also gives `X`.
    #[must_use]
    pub fn translate_codon(&self, codon: &[u8]) -> u8 {
        let [c1, c2, c3] = codon else {
            return b'X';
        };
        let (Some(e1), Some(e2), Some(e3)) = (expand(*c1), expand(*c2), expand(*c3)) else {
            return b'X';
        };

        let mut residue = None;
        for &b1 in e1 {
            for &b2 in e2 {
                for &b3 in e3 {
                    let aa = self.lookup(b1, b2, b3);
                    match residue {
                        None => residue = Some(aa),
                        Some(prev) if prev != aa => return b'X',
                        Some(_) => {}
                    }
                }
            }
        }
        residue.unwrap_or(b'X')
    }

    /// Translate every complete codon of `seq`; trailing bases that do not
    /// fill a codon are ignored.
    #[must_use]
    pub fn translate(&self, seq: &[u8]) -> String {
        seq.chunks_exact(3)
            .map(|codon| char::from(self.translate_codon(codon)))
            .collect()
    }
}

impl Default for GeneticCode {
    fn default() -> Self {
        Self::bacterial()
    }
}

/// Index of an unambiguous base in NCBI codon order (T, C, A, G)
fn base_index(base: u8) -> usize {
    match base {
        b'T' => 0,
        b'C' => 1,
        b'A' => 2,
        _ => 3,
    }
}

/// Unambiguous bases an IUPAC nucleotide code stands for
fn expand(base: u8) -> Option<&'static [u8]> {
    let bases: &'static [u8] = match base.to_ascii_uppercase() {
        b'A' => b"A",
        b'C' => b"C",
        b'G' => b"G",
        b'T' | b'U' => b"T",
        b'R' => b"AG",
        b'Y' => b"CT",
        b'S' => b"CG",
        b'W' => b"AT",
        b'K' => b"GT",
        b'M' => b"AC",
        b'B' => b"CGT",
        b'D' => b"AGT",
        b'H' => b"ACT",
        b'V' => b"ACG",
        b'N' => b"ACGT",
        _ => return None,
    };
    Some(bases)
}

/// Translate nucleotides read on `strand` with table 11.
///
/// Minus-strand input is reverse-complemented before translation.
#[must_use]
pub fn translate_on_strand(nucleotides: &str, strand: Strand) -> String {
    let code = GeneticCode::bacterial();
    match strand {
        Strand::Reverse => code.translate(&dna::revcomp(nucleotides.as_bytes())),
        Strand::Forward => code.translate(nucleotides.as_bytes()),
    }
}
