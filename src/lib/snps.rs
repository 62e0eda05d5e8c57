//! SNPs of every sequence in an alignment relative to a reference.
//!
//! The reference is the first record of its stream. Query records are read in order,
//! encoded and compared on a pool of workers, and written in input order as soon as each
//! next row is available:
//!
//! ```text
//! query,SNPs
//! seq1,C2G|T100A
//! seq2,
//! ```
//!
//! Each SNP is `<reference base><1-based position><query base>`.

use std::io::{BufRead, Write};

use log::info;

use crate::compare::{Difference, compare};
use crate::errors::Result;
use crate::fasta::{EncodedSequence, FastaRecords, RawRecord, check_width, read_reference};
use crate::pipeline::run_ordered;
use crate::progress::ProgressTracker;

/// Header line of the SNPs CSV output.
pub const SNPS_HEADER: &str = "query,SNPs";

/// SNPs of one query sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnpRecord {
    /// Query name.
    pub query: String,
    /// Differing columns against the reference, in ascending position.
    pub differences: Vec<Difference>,
}

impl SnpRecord {
    /// Writes the CSV row `query,SNP|SNP|...`.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_row<W: Write + ?Sized>(&self, out: &mut W) -> std::io::Result<()> {
        write!(out, "{},", self.query)?;
        for (i, difference) in self.differences.iter().enumerate() {
            if i > 0 {
                out.write_all(b"|")?;
            }
            write!(out, "{difference}")?;
        }
        out.write_all(b"\n")
    }
}

/// Encodes one query and compares it against the reference.
///
/// # Errors
///
/// Returns [`crate::errors::AlnError::UnsupportedSymbol`] or
/// [`crate::errors::AlnError::AlignmentWidthMismatch`].
pub fn snps_for_record(reference: &EncodedSequence, record: RawRecord) -> Result<SnpRecord> {
    check_width(&record.name, reference.len(), record.sequence.len())?;
    let query = record.encode()?;
    let comparison = compare(reference.codes(), query.codes());
    Ok(SnpRecord { query: query.name().to_string(), differences: comparison.differences })
}

/// Totals for a SNPs run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnpsSummary {
    /// Number of query rows written.
    pub queries: u64,
    /// Total SNPs over all queries.
    pub total_snps: u64,
    /// Query with the most SNPs and its count (first one on ties).
    pub most_snps: Option<(String, usize)>,
}

impl SnpsSummary {
    fn add(&mut self, record: &SnpRecord) {
        self.queries += 1;
        self.total_snps += record.differences.len() as u64;
        let count = record.differences.len();
        if self.most_snps.as_ref().is_none_or(|(_, most)| count > *most) {
            self.most_snps = Some((record.query.clone(), count));
        }
    }
}

/// Finds the SNPs of every query record against the reference and writes them in input
/// order.
///
/// The reference is the first record of `reference`; later records are ignored.
///
/// # Errors
///
/// Returns [`crate::errors::AlnError::EmptyInput`] if the reference stream has no records,
/// and otherwise the first read, encoding, width or write error. Rows already written
/// before the error are not retracted.
pub fn find_snps<R, Q, W>(
    reference: R,
    queries: Q,
    out: &mut W,
    threads: usize,
) -> Result<SnpsSummary>
where
    R: BufRead,
    Q: BufRead + Send,
    W: Write + ?Sized,
{
    let reference = read_reference(reference)?;
    info!("Reference '{}' has {} columns", reference.name(), reference.len());

    writeln!(out, "{SNPS_HEADER}")?;

    let progress = ProgressTracker::new("Wrote SNPs for queries").with_interval(10_000);
    let mut summary = SnpsSummary::default();
    let stats = run_ordered(
        FastaRecords::new(queries),
        threads,
        |_, record| snps_for_record(&reference, record),
        |record: SnpRecord| {
            record.write_row(&mut *out)?;
            summary.add(&record);
            progress.log_if_needed(1);
            Ok(())
        },
    )?;
    progress.log_final();
    out.flush()?;

    info!("Held back at most {} out-of-order rows", stats.max_buffered);
    Ok(summary)
}
