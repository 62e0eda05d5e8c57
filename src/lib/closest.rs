//! Closest-match search: for each query, the target with the smallest genetic distance.
//!
//! Ties on distance are exact ties (no epsilon) and are broken by the targets'
//! completeness scores; remaining ties go to the earliest target. Undefined (`NaN`)
//! distances tie with each other and lose to every defined distance.
//!
//! [`find_closest`] splits the queries into contiguous chunks, one per worker. Each worker
//! runs [`select_closest`] for its chunk against the full, shared target set and sends back
//! its rows tagged with the chunk id; the coordinator places the chunks back in order.

use std::cmp::Ordering;
use std::io::Write;
use std::ops::Range;

use crossbeam_channel::unbounded;
use log::{debug, info};

use crate::compare::{Difference, compare, distance};
use crate::completeness::score_alignment;
use crate::errors::{AlnError, Result};
use crate::fasta::{EncodedSequence, check_width};

/// Header line of the closest-match CSV output.
pub const CLOSEST_HEADER: &str = "query,closest,SNPdistance,SNPs";

/// The closest target found for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosestMatch {
    /// Query name.
    pub query: String,
    /// Name of the selected target.
    pub target: String,
    /// Position of the selected target in the target alignment.
    pub target_index: usize,
    /// Normalized distance to the selected target (`NaN` if undefined).
    pub distance: f64,
    /// Whether completeness was needed to choose between equally close targets.
    pub tie_broken: bool,
    /// Differing columns between query and target, in ascending position.
    pub differences: Vec<Difference>,
}

impl ClosestMatch {
    /// Number of differing columns.
    #[must_use]
    pub fn snp_distance(&self) -> usize {
        self.differences.len()
    }

    /// Writes the CSV row `query,closest,SNPdistance,SNPs` with `;`-separated
    /// differences rendered as `<position><query><target>`.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_row<W: Write + ?Sized>(&self, out: &mut W) -> std::io::Result<()> {
        write!(out, "{},{},{},", self.query, self.target, self.snp_distance())?;
        for (i, difference) in self.differences.iter().enumerate() {
            if i > 0 {
                out.write_all(b";")?;
            }
            write!(out, "{}", difference.query_first())?;
        }
        out.write_all(b"\n")
    }
}

/// Returns every index holding the minimum distance, in order.
///
/// Distances are compared with [`f64::total_cmp`], so `NaN` sorts after every number and
/// equal `NaN`s tie.
#[must_use]
pub fn min_distance_indices(distances: &[f64]) -> Vec<usize> {
    let mut indices = Vec::new();
    let mut min = f64::NAN;
    for (i, &d) in distances.iter().enumerate() {
        if i == 0 {
            min = d;
            indices.push(i);
            continue;
        }
        match d.total_cmp(&min) {
            Ordering::Less => {
                min = d;
                indices.clear();
                indices.push(i);
            }
            Ordering::Equal => indices.push(i),
            Ordering::Greater => {}
        }
    }
    indices
}

/// Picks the best target index among equally close candidates: highest completeness,
/// then earliest.
///
/// Returns `None` if there are no candidates.
#[must_use]
pub fn best_by_completeness(candidates: &[usize], scores: &[u64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for &i in candidates {
        match best {
            Some(b) if scores[i] <= scores[b] => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Finds the closest target to one query.
///
/// `scores` holds the completeness score of each target, in target order. Returns `None`
/// if there are no targets. All sequences must share one width.
#[must_use]
pub fn select_closest(
    query: &EncodedSequence,
    targets: &[EncodedSequence],
    scores: &[u64],
) -> Option<ClosestMatch> {
    debug_assert_eq!(targets.len(), scores.len(), "One score per target");

    let distances: Vec<f64> =
        targets.iter().map(|target| distance(target.codes(), query.codes())).collect();
    let candidates = min_distance_indices(&distances);
    let best = best_by_completeness(&candidates, scores)?;

    let target = &targets[best];
    let comparison = compare(target.codes(), query.codes());
    Some(ClosestMatch {
        query: query.name().to_string(),
        target: target.name().to_string(),
        target_index: best,
        distance: distances[best],
        tie_broken: candidates.len() > 1,
        differences: comparison.differences,
    })
}

/// Splits `0..len` into `parts` contiguous ranges whose sizes differ by at most one.
#[must_use]
pub fn chunk_ranges(len: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.clamp(1, len.max(1));
    (0..parts).map(|i| (i * len / parts)..((i + 1) * len / parts)).collect()
}

/// Finds the closest target for every query, in query order.
///
/// The number of workers is the pool's thread count, never more than the number of
/// queries.
///
/// # Errors
///
/// Returns [`AlnError::EmptyInput`] if either set is empty, or
/// [`AlnError::AlignmentWidthMismatch`] if the query and target widths differ. Both sets
/// must already be internally uniform (see [`crate::fasta::read_alignment`]).
pub fn find_closest(
    queries: &[EncodedSequence],
    targets: &[EncodedSequence],
    pool: &rayon::ThreadPool,
) -> Result<Vec<ClosestMatch>> {
    let first_query =
        queries.first().ok_or_else(|| AlnError::EmptyInput { what: "query alignment".into() })?;
    let first_target =
        targets.first().ok_or_else(|| AlnError::EmptyInput { what: "target alignment".into() })?;
    check_width(first_query.name(), first_target.len(), first_query.len())?;

    let scores = score_alignment(targets, pool);
    let ranges = chunk_ranges(queries.len(), pool.current_num_threads());
    debug!("Processing {} queries in {} chunks", queries.len(), ranges.len());

    let (tx, rx) = unbounded::<(usize, Vec<ClosestMatch>)>();
    pool.scope(|scope| {
        for (chunk_id, range) in ranges.iter().cloned().enumerate() {
            let tx = tx.clone();
            let chunk = &queries[range];
            let scores = &scores;
            scope.spawn(move |_| {
                let rows = chunk
                    .iter()
                    .filter_map(|query| select_closest(query, targets, scores))
                    .collect();
                // The receiver outlives the scope, so this cannot fail.
                let _ = tx.send((chunk_id, rows));
            });
        }
    });
    drop(tx);

    let mut slots: Vec<Option<Vec<ClosestMatch>>> = vec![None; ranges.len()];
    for (chunk_id, rows) in rx {
        slots[chunk_id] = Some(rows);
    }

    let mut matches = Vec::with_capacity(queries.len());
    for (chunk_id, slot) in slots.into_iter().enumerate() {
        let rows = slot.ok_or_else(|| {
            AlnError::Io(std::io::Error::other(format!("chunk {chunk_id} produced no results")))
        })?;
        matches.extend(rows);
    }
    Ok(matches)
}

/// Summary of a closest-match run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClosestSummary {
    /// Number of query rows written.
    pub queries: u64,
    /// Number of queries whose match needed a completeness tie-break.
    pub tie_breaks: u64,
}

/// Writes the header and one row per match.
///
/// # Errors
///
/// Returns [`AlnError::Io`] on write failure.
pub fn write_closest<W: Write + ?Sized>(
    matches: &[ClosestMatch],
    out: &mut W,
) -> Result<ClosestSummary> {
    writeln!(out, "{CLOSEST_HEADER}")?;
    let mut summary = ClosestSummary::default();
    for m in matches {
        m.write_row(out)?;
        summary.queries += 1;
        summary.tie_breaks += u64::from(m.tie_broken);
    }
    out.flush()?;
    Ok(summary)
}

/// Finds and writes the closest target for every query.
///
/// # Errors
///
/// See [`find_closest`] and [`write_closest`].
pub fn run_closest<W: Write + ?Sized>(
    queries: &[EncodedSequence],
    targets: &[EncodedSequence],
    pool: &rayon::ThreadPool,
    out: &mut W,
) -> Result<ClosestSummary> {
    info!("Number of sequences in query alignment: {}", queries.len());
    info!("Number of sequences in target alignment: {}", targets.len());
    let matches = find_closest(queries, targets, pool)?;
    write_closest(&matches, out)
}
