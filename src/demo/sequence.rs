//! Nucleotide helpers used to synthesize plausible demo genes.

use rand::seq::index;
use rand::Rng;

/// Nucleotide alphabet.
pub const NUCLEOTIDES: [u8; 4] = *b"ATGC";

/// Start codon placed at the beginning of every synthetic gene.
pub const START_CODON: &str = "ATG";

/// Stop codons; one of them ends every synthetic gene.
pub const STOP_CODONS: [&str; 3] = ["TAA", "TAG", "TGA"];

// NCBI translation table 1, indexed by 16*b1 + 4*b2 + b3 with T=0, C=1, A=2, G=3.
const STANDARD_CODE: &[u8; 64] =
    b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

fn base_index(base: u8) -> Option<usize> {
    match base {
        b'T' | b't' => Some(0),
        b'C' | b'c' => Some(1),
        b'A' | b'a' => Some(2),
        b'G' | b'g' => Some(3),
        _ => None,
    }
}

/// Amino acid one-letter code for a codon; `*` for stop, `None` if the codon
/// contains anything but `ATGC`.
pub fn translate_codon(codon: &[u8]) -> Option<char> {
    if codon.len() != 3 {
        return None;
    }
    let idx = base_index(codon[0])? * 16 + base_index(codon[1])? * 4 + base_index(codon[2])?;
    Some(STANDARD_CODE[idx] as char)
}

/// Translate in frame from the first base until the first stop codon.
/// Codons with unknown bases become `X`.
pub fn translate(sequence: &str) -> String {
    sequence
        .as_bytes()
        .chunks_exact(3)
        .map(|codon| translate_codon(codon).unwrap_or('X'))
        .take_while(|aa| *aa != '*')
        .collect()
}

/// GC percentage in `[0, 100]`; an empty sequence counts as 50.
pub fn gc_content(sequence: &str) -> f64 {
    if sequence.is_empty() {
        return 50.0;
    }
    let gc = sequence
        .bytes()
        .filter(|b| matches!(b, b'G' | b'C' | b'g' | b'c'))
        .count();
    gc as f64 * 100.0 / sequence.len() as f64
}

/// Position-wise mismatches over the shorter of the two sequences.
pub fn mismatch_count(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).filter(|(x, y)| x != y).count()
}

/// True when every base is one of `ATGC`.
pub fn is_nucleotide_sequence(sequence: &str) -> bool {
    sequence.bytes().all(|b| NUCLEOTIDES.contains(&b))
}

/// A base drawn uniformly from the alphabet.
pub fn random_base<R: Rng>(rng: &mut R) -> u8 {
    NUCLEOTIDES[rng.random_range(0..NUCLEOTIDES.len())]
}

/// A base drawn uniformly from the three bases other than `current`.
pub fn random_base_except<R: Rng>(rng: &mut R, current: u8) -> u8 {
    let others: Vec<u8> = NUCLEOTIDES.iter().copied().filter(|b| *b != current).collect();
    others[rng.random_range(0..others.len())]
}

/// Open reading frame of `codons` codons: `ATG`, sense codons without an
/// in-frame stop, then one stop codon.
///
/// `codons` is raised to 3 if smaller.
pub fn random_coding_sequence<R: Rng>(rng: &mut R, codons: usize) -> String {
    let codons = codons.max(3);
    let mut seq = String::with_capacity(codons * 3);
    seq.push_str(START_CODON);

    for _ in 0..codons - 2 {
        loop {
            let codon = [random_base(rng), random_base(rng), random_base(rng)];
            if translate_codon(&codon) != Some('*') {
                seq.extend(codon.iter().map(|b| *b as char));
                break;
            }
        }
    }

    seq.push_str(STOP_CODONS[rng.random_range(0..STOP_CODONS.len())]);
    seq
}

/// Number of positions [`mutate`] rewrites for a sequence of `len` bases.
pub fn mutation_count(len: usize, rate: f64) -> usize {
    let interior = len.saturating_sub(6);
    ((len as f64 * rate).round() as usize).min(interior)
}

/// Copy of `sequence` with `mutation_count(len, rate)` distinct positions set
/// to a different base. The start and stop codons are left alone, and the
/// length never changes.
pub fn mutate<R: Rng>(rng: &mut R, sequence: &str, rate: f64) -> String {
    let mut bases = sequence.as_bytes().to_vec();
    let interior = bases.len().saturating_sub(6);
    let count = mutation_count(bases.len(), rate);

    for offset in index::sample(rng, interior, count).into_iter() {
        let pos = offset + 3;
        bases[pos] = random_base_except(rng, bases[pos]);
    }

    bases.into_iter().map(char::from).collect()
}
