//! Genome completeness scores.
//!
//! A sequence's score is the sum of the per-call weights from
//! [`alncmp_dna::nucleotide::score`], so more unambiguous calls means a higher score.
//! Scores only break ties between equally close targets.

use alncmp_dna::nucleotide;
use rayon::prelude::*;

use crate::fasta::EncodedSequence;

/// Sums the completeness weights of every call in a sequence.
///
/// ```
/// use alncmp_lib::completeness::completeness_score;
/// use alncmp_lib::fasta::encode_sequence;
///
/// let full = encode_sequence("a", b"ACGT").unwrap();
/// let partial = encode_sequence("b", b"ACNN").unwrap();
/// assert!(completeness_score(&full) > completeness_score(&partial));
/// ```
#[must_use]
pub fn completeness_score(codes: &[u8]) -> u64 {
    codes.iter().map(|&code| u64::from(nucleotide::score(code))).sum()
}

/// Scores every sequence of an alignment, in alignment order.
#[must_use]
pub fn score_alignment(sequences: &[EncodedSequence], pool: &rayon::ThreadPool) -> Vec<u64> {
    pool.install(|| sequences.par_iter().map(|s| completeness_score(s.codes())).collect())
}
