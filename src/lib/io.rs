//! Opening input and output streams.
//!
//! `-` (or `/dev/stdin`, `/dev/stdout`) selects the standard streams; anything else is a
//! file path.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;

/// Buffer size for file readers and writers.
const BUFFER_SIZE: usize = 1 << 16;

/// Returns true if the path refers to standard input.
///
/// ```
/// use alncmp_lib::io::is_stdin_path;
/// use std::path::Path;
///
/// assert!(is_stdin_path(Path::new("-")));
/// assert!(is_stdin_path(Path::new("/dev/stdin")));
/// assert!(!is_stdin_path(Path::new("alignment.fasta")));
/// ```
pub fn is_stdin_path<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref().to_string_lossy();
    path == "-" || path == "/dev/stdin"
}

/// Returns true if the path refers to standard output.
pub fn is_stdout_path<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref().to_string_lossy();
    path == "-" || path == "/dev/stdout"
}

/// Opens a buffered reader on a file or standard input.
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub fn open_input<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead + Send>> {
    let path = path.as_ref();
    if is_stdin_path(path) {
        return Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, io::stdin())));
    }
    let file =
        File::open(path).with_context(|| format!("Failed to open input: {}", path.display()))?;
    Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, file)))
}

/// Buffered writer on a file or standard output.
pub type OutputWriter = BufWriter<Box<dyn Write>>;

/// Opens a buffered writer on a file or standard output.
///
/// Nothing reaches the underlying stream until the buffer fills or is flushed, so a
/// failed run can drop what it buffered with [`abandon_output`].
///
/// # Errors
///
/// Returns an error if the file cannot be created.
pub fn open_output<P: AsRef<Path>>(path: P) -> Result<OutputWriter> {
    let path = path.as_ref();
    let inner: Box<dyn Write> = if is_stdout_path(path) {
        Box::new(io::stdout().lock())
    } else {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output: {}", path.display()))?;
        Box::new(file)
    };
    Ok(BufWriter::with_capacity(BUFFER_SIZE, inner))
}

/// Closes a writer without flushing, returning the number of buffered bytes dropped.
pub fn abandon_output(writer: OutputWriter) -> usize {
    let (_inner, buffered) = writer.into_parts();
    buffered.map_or_else(|panicked| panicked.into_inner().len(), |bytes| bytes.len())
}

/// Removes a partially written output file after a failed run.
///
/// Standard output is left alone. Failure to remove is logged, not returned.
pub fn discard_output<P: AsRef<Path>>(path: P) {
    let path = path.as_ref();
    if is_stdout_path(path) || !path.exists() {
        return;
    }
    if let Err(e) = std::fs::remove_file(path) {
        warn!("Failed to remove incomplete output {}: {e}", path.display());
    }
}
