//! Input validation utilities
//!
//! Validation of command-line parameters and input paths with consistent error messages.

use crate::errors::{AlnError, Result};
use crate::io::is_stdin_path;
use std::path::Path;

/// Validate that an input file exists (standard input always passes)
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use alncmp_lib::validation::validate_input_exists;
///
/// assert!(validate_input_exists("/nonexistent/alignment.fasta", "Query alignment").is_err());
/// assert!(validate_input_exists("-", "Query alignment").is_ok());
/// ```
pub fn validate_input_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path = path.as_ref();
    if is_stdin_path(path) || path.exists() {
        return Ok(());
    }
    Err(AlnError::InvalidParameter {
        parameter: description.to_string(),
        reason: format!("File does not exist: {}", path.display()),
    })
}

/// Validate that at most one input is read from standard input
///
/// # Errors
/// Returns an error if two or more of the paths are standard input
pub fn validate_single_stdin<P: AsRef<Path>>(inputs: &[(P, &str)]) -> Result<()> {
    let stdin: Vec<&str> =
        inputs.iter().filter(|(path, _)| is_stdin_path(path)).map(|(_, desc)| *desc).collect();
    if stdin.len() > 1 {
        return Err(AlnError::InvalidParameter {
            parameter: stdin.join(", "),
            reason: "Only one input can be read from standard input".to_string(),
        });
    }
    Ok(())
}

/// Resolve the worker count: an explicit value must be at least 1, and the default is the
/// available CPU parallelism
///
/// # Errors
/// Returns an error if `threads` is `Some(0)`
///
/// # Example
/// ```
/// use alncmp_lib::validation::resolve_threads;
///
/// assert_eq!(resolve_threads(Some(4)).unwrap(), 4);
/// assert!(resolve_threads(None).unwrap() >= 1);
/// assert!(resolve_threads(Some(0)).is_err());
/// ```
pub fn resolve_threads(threads: Option<usize>) -> Result<usize> {
    match threads {
        Some(0) => Err(AlnError::InvalidParameter {
            parameter: "threads".to_string(),
            reason: "must be at least 1".to_string(),
        }),
        Some(n) => Ok(n),
        None => Ok(std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)),
    }
}
