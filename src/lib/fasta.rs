//! Reading and encoding FASTA-format alignments.
//!
//! Records are read sequentially with noodles and tagged with their position in the input
//! stream. That index is the only ordering key downstream: encoding and comparison may
//! happen on any worker in any order, and output order is restored from the index.
//!
//! Encoding converts every column to a nucleotide code (see [`alncmp_dna::nucleotide`]).
//! Alignments compared column by column must share one width; [`check_width`] and
//! [`ensure_uniform_width`] enforce that before any comparison work starts.

use std::io::BufRead;

use alncmp_dna::nucleotide;
use log::debug;
use noodles::fasta;
use rayon::prelude::*;

use crate::errors::{AlnError, Result};

/// A named sequence as read from the input, not yet encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Position of the record in its input stream, starting at 0.
    pub index: u64,
    /// Record name (first word of the FASTA definition line).
    pub name: String,
    /// Sequence bytes with line breaks removed.
    pub sequence: Vec<u8>,
}

impl RawRecord {
    /// Creates a raw record.
    #[must_use]
    pub fn new(index: u64, name: impl Into<String>, sequence: impl Into<Vec<u8>>) -> Self {
        Self { index, name: name.into(), sequence: sequence.into() }
    }

    /// Encodes every column of this record.
    ///
    /// # Errors
    ///
    /// Returns [`AlnError::UnsupportedSymbol`] naming the first byte outside the
    /// nucleotide alphabet.
    pub fn encode(self) -> Result<EncodedSequence> {
        let codes = encode_sequence(&self.name, &self.sequence)?;
        Ok(EncodedSequence { index: self.index, name: self.name, codes })
    }
}

/// A named sequence of nucleotide codes, one per alignment column.
///
/// Immutable once built, so it can be shared between workers by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSequence {
    index: u64,
    name: String,
    codes: Vec<u8>,
}

impl EncodedSequence {
    /// Position of the sequence in its input stream.
    #[must_use]
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Sequence name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One nucleotide code per column.
    #[must_use]
    pub fn codes(&self) -> &[u8] {
        &self.codes
    }

    /// Number of alignment columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True for a zero-width sequence.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Encodes raw sequence bytes.
///
/// # Errors
///
/// Returns [`AlnError::UnsupportedSymbol`] with the 1-based position of the first
/// unsupported byte.
///
/// # Example
///
/// ```
/// use alncmp_lib::fasta::encode_sequence;
///
/// assert_eq!(encode_sequence("s", b"AcN-").unwrap(), vec![136, 40, 240, 244]);
/// assert!(encode_sequence("s", b"AXG").is_err());
/// ```
pub fn encode_sequence(name: &str, sequence: &[u8]) -> Result<Vec<u8>> {
    sequence
        .iter()
        .enumerate()
        .map(|(i, &symbol)| {
            nucleotide::encode(symbol).ok_or_else(|| AlnError::UnsupportedSymbol {
                record: name.to_string(),
                position: i + 1,
                symbol,
            })
        })
        .collect()
}

/// Characters of an offending line kept in error messages.
const MAX_LINE_IN_ERROR: usize = 40;

/// Iterator over the records of a FASTA stream, numbered in arrival order.
///
/// Blank lines before a definition line are skipped. The iterator ends after the first
/// error.
pub struct FastaRecords<R> {
    reader: fasta::io::Reader<R>,
    next_index: u64,
    finished: bool,
}

impl<R: BufRead> FastaRecords<R> {
    /// Wraps a buffered reader.
    pub fn new(inner: R) -> Self {
        Self { reader: fasta::io::Reader::new(inner), next_index: 0, finished: false }
    }

    fn read_record(&mut self) -> Option<Result<RawRecord>> {
        let mut definition = String::new();
        loop {
            definition.clear();
            match self.reader.read_definition(&mut definition) {
                Ok(0) => return None,
                Ok(_) if definition.trim().is_empty() => {}
                Ok(_) => break,
                Err(e) => return Some(Err(e.into())),
            }
        }

        let index = self.next_index;
        let Some(header) = definition.strip_prefix('>') else {
            return Some(Err(AlnError::MalformedRecord {
                record: index + 1,
                line: definition.chars().take(MAX_LINE_IN_ERROR).collect(),
            }));
        };

        let mut sequence = Vec::new();
        if let Err(e) = self.reader.read_sequence(&mut sequence) {
            return Some(Err(e.into()));
        }

        self.next_index += 1;
        Some(Ok(RawRecord { index, name: parse_name(header), sequence }))
    }
}

impl<R: BufRead> Iterator for FastaRecords<R> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let record = self.read_record();
        self.finished = !matches!(record, Some(Ok(_)));
        record
    }
}

/// Extracts the record name (first word) from a definition line without its `>`.
fn parse_name(header: &str) -> String {
    header.split_whitespace().next().unwrap_or_default().to_string()
}

/// Reads the first record of a stream and encodes it as the reference.
///
/// Records after the first are ignored.
///
/// # Errors
///
/// Returns [`AlnError::EmptyInput`] if the stream has no records, or the read or
/// encoding error of the first record.
pub fn read_reference<R: BufRead>(reader: R) -> Result<EncodedSequence> {
    let record = FastaRecords::new(reader)
        .next()
        .ok_or_else(|| AlnError::EmptyInput { what: "reference".to_string() })??;
    let reference = record.encode()?;
    debug!("Loaded reference '{}' ({} columns)", reference.name(), reference.len());
    Ok(reference)
}

/// Reads every record of a stream and encodes them on the given thread pool.
///
/// The returned sequences are in input order and share one width.
///
/// # Errors
///
/// Returns the first read error, [`AlnError::EmptyInput`] if the stream has no
/// records, [`AlnError::UnsupportedSymbol`] or [`AlnError::AlignmentWidthMismatch`].
pub fn read_alignment<R: BufRead>(
    reader: R,
    what: &str,
    pool: &rayon::ThreadPool,
) -> Result<Vec<EncodedSequence>> {
    let records = FastaRecords::new(reader).collect::<Result<Vec<_>>>()?;
    if records.is_empty() {
        return Err(AlnError::EmptyInput { what: what.to_string() });
    }

    let sequences = encode_records(records, pool)?;
    ensure_uniform_width(&sequences)?;
    Ok(sequences)
}

/// Encodes records in parallel, preserving order.
///
/// # Errors
///
/// Returns an [`AlnError::UnsupportedSymbol`] from one of the failing records.
pub fn encode_records(
    records: Vec<RawRecord>,
    pool: &rayon::ThreadPool,
) -> Result<Vec<EncodedSequence>> {
    pool.install(|| records.into_par_iter().map(RawRecord::encode).collect())
}

/// Checks that a sequence has the expected number of columns.
///
/// # Errors
///
/// Returns [`AlnError::AlignmentWidthMismatch`] if the widths differ.
pub fn check_width(name: &str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(AlnError::AlignmentWidthMismatch { record: name.to_string(), expected, found })
    }
}

/// Checks that all sequences have the width of the first.
///
/// # Errors
///
/// Returns [`AlnError::AlignmentWidthMismatch`] naming the first sequence that differs.
pub fn ensure_uniform_width(sequences: &[EncodedSequence]) -> Result<()> {
    let Some(first) = sequences.first() else {
        return Ok(());
    };
    sequences.iter().try_for_each(|s| check_width(s.name(), first.len(), s.len()))
}
