//! Custom error types for alignment comparison.

use thiserror::Error;

/// Result type alias for alncmp operations
pub type Result<T> = std::result::Result<T, AlnError>;

/// Error type for alncmp operations.
///
/// Every variant is fatal to a run: there is no partial-success mode.
#[derive(Error, Debug)]
pub enum AlnError {
    /// A sequence contains a byte outside the nucleotide alphabet
    #[error("Unsupported symbol '{}' at position {position} of sequence '{record}'", display_symbol(.symbol))]
    UnsupportedSymbol {
        /// Name of the offending record
        record: String,
        /// 1-based column of the offending byte
        position: usize,
        /// The offending byte
        symbol: u8,
    },

    /// Sequences that must be compared column by column have different widths
    #[error(
        "Alignment width mismatch: sequence '{record}' has {found} columns, expected {expected}"
    )]
    AlignmentWidthMismatch {
        /// Name of the record whose width differs
        record: String,
        /// Width established by the reference or the first record
        expected: usize,
        /// Width of the offending record
        found: usize,
    },

    /// A FASTA record does not start with a `>` definition line
    #[error("Malformed FASTA record {record}: expected a '>' definition line, found '{line}'")]
    MalformedRecord {
        /// 1-based number of the record in its stream
        record: u64,
        /// Start of the offending line
        line: String,
    },

    /// An input that needs at least one record has none
    #[error("No sequences found in {what}")]
    EmptyInput {
        /// Which input was empty (e.g., "reference", "target alignment")
        what: String,
    },

    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// Read or write failure on an input or output stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders a byte for error messages, escaping non-printable values.
#[allow(clippy::trivially_copy_pass_by_ref)]
fn display_symbol(symbol: &u8) -> String {
    if symbol.is_ascii_graphic() {
        char::from(*symbol).to_string()
    } else {
        symbol.escape_ascii().to_string()
    }
}
