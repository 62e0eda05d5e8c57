//! Column-by-column comparison of two encoded sequences.
//!
//! Each column falls into exactly one class:
//!
//! - **different**: the calls share no base. Counted in the distance numerator and
//!   denominator, and reported as a [`Difference`].
//! - **same-confirmed**: both calls are the same unambiguous base. Counted in the
//!   denominator only.
//! - **uninformative**: everything else (ambiguity codes, `N`, gaps). Ignored.
//!
//! The distance is `differences / (differences + same_confirmed)` and is `NaN` when no
//! column is informative.

use std::fmt;

use alncmp_dna::nucleotide::{decode, is_different, is_same_confirmed};

/// One differing column between a reference and a query sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Difference {
    /// 1-based column.
    pub position: usize,
    /// Uppercase symbol of the reference (or target) call.
    pub reference: u8,
    /// Uppercase symbol of the query call.
    pub query: u8,
}

impl Difference {
    /// Renders the difference query-first, as `<position><query><reference>`.
    ///
    /// ```
    /// use alncmp_lib::compare::Difference;
    ///
    /// let d = Difference { position: 4, reference: b'T', query: b'A' };
    /// assert_eq!(d.query_first().to_string(), "4AT");
    /// ```
    #[must_use]
    pub fn query_first(&self) -> QueryFirst<'_> {
        QueryFirst(self)
    }
}

/// Renders `<reference><position><query>`, e.g. `C2G`.
impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", char::from(self.reference), self.position, char::from(self.query))
    }
}

/// Display adapter returned by [`Difference::query_first`].
pub struct QueryFirst<'a>(&'a Difference);

impl fmt::Display for QueryFirst<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.0.position, char::from(self.0.query), char::from(self.0.reference))
    }
}

/// Per-class column counts for one pair of sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnCounts {
    /// Columns whose calls share no base.
    pub different: usize,
    /// Columns with the same unambiguous call on both sides.
    pub same_confirmed: usize,
    /// All other columns.
    pub uninformative: usize,
}

impl ColumnCounts {
    /// Number of columns that contribute to the distance.
    #[must_use]
    pub fn informative(&self) -> usize {
        self.different + self.same_confirmed
    }

    /// Total number of columns compared.
    #[must_use]
    pub fn total(&self) -> usize {
        self.informative() + self.uninformative
    }

    /// Fraction of informative columns that differ, or `NaN` if none are informative.
    #[must_use]
    pub fn distance(&self) -> f64 {
        match self.informative() {
            0 => f64::NAN,
            denominator => self.different as f64 / denominator as f64,
        }
    }

    #[inline]
    fn record(&mut self, reference: u8, query: u8) -> bool {
        if is_different(reference, query) {
            self.different += 1;
            true
        } else {
            if is_same_confirmed(reference, query) {
                self.same_confirmed += 1;
            } else {
                self.uninformative += 1;
            }
            false
        }
    }
}

/// Full comparison result: column counts and every differing column in ascending order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    /// Per-class column counts.
    pub counts: ColumnCounts,
    /// Differing columns in ascending position.
    pub differences: Vec<Difference>,
}

impl Comparison {
    /// Normalized distance, `NaN` when no column is informative.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.counts.distance()
    }

    /// Number of differing columns.
    #[must_use]
    pub fn snp_distance(&self) -> usize {
        self.differences.len()
    }
}

/// Compares a query against a reference, collecting every difference.
///
/// Both slices must have the same length; callers validate widths first.
///
/// # Example
///
/// ```
/// use alncmp_lib::compare::compare;
/// use alncmp_lib::fasta::encode_sequence;
///
/// let reference = encode_sequence("ref", b"ACGT").unwrap();
/// let query = encode_sequence("q", b"AGGT").unwrap();
/// let result = compare(&reference, &query);
///
/// assert_eq!(result.differences.len(), 1);
/// assert_eq!(result.differences[0].to_string(), "C2G");
/// assert!((result.distance() - 0.25).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn compare(reference: &[u8], query: &[u8]) -> Comparison {
    debug_assert_eq!(reference.len(), query.len(), "Sequences must have equal width");

    let mut counts = ColumnCounts::default();
    let mut differences = Vec::new();
    for (i, (&r, &q)) in reference.iter().zip(query).enumerate() {
        if counts.record(r, q) {
            differences.push(Difference {
                position: i + 1,
                reference: decode(r),
                query: decode(q),
            });
        }
    }
    Comparison { counts, differences }
}

/// Counts column classes without collecting differences.
#[must_use]
pub fn count_columns(reference: &[u8], query: &[u8]) -> ColumnCounts {
    debug_assert_eq!(reference.len(), query.len(), "Sequences must have equal width");

    let mut counts = ColumnCounts::default();
    for (&r, &q) in reference.iter().zip(query) {
        counts.record(r, q);
    }
    counts
}

/// Normalized distance between two sequences, `NaN` when no column is informative.
#[inline]
#[must_use]
pub fn distance(reference: &[u8], query: &[u8]) -> f64 {
    count_columns(reference, query).distance()
}
