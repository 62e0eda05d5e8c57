//! Common CLI options shared across commands.
//!
//! These argument groups are composed into command structs with `#[command(flatten)]`.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use log::error;

use alncmp_lib::io::{abandon_output, discard_output, open_output};
use alncmp_lib::validation::resolve_threads;

/// Worker thread options.
#[derive(Debug, Clone, Default, Args)]
pub struct ThreadingOptions {
    /// Number of worker threads [default: available CPUs]
    #[arg(short = 't', long = "threads")]
    pub threads: Option<usize>,
}

impl ThreadingOptions {
    /// Resolves the worker count, capped at `max_useful` when given.
    pub fn resolve(&self, max_useful: Option<usize>) -> Result<usize> {
        let threads = resolve_threads(self.threads)?;
        Ok(max_useful.map_or(threads, |max| threads.min(max.max(1))))
    }
}

/// Output options for commands that write one CSV file.
#[derive(Debug, Clone, Args)]
pub struct OutputOptions {
    /// Output CSV file ('-' for stdout)
    #[arg(short = 'o', long = "output", default_value = "-")]
    pub output: PathBuf,
}

impl OutputOptions {
    /// Runs `body` against the opened output and flushes it.
    ///
    /// If `body` fails, the bytes still buffered are dropped instead of flushed and a named
    /// output file is removed. Only output already forced out by a full buffer can reach
    /// standard output on failure.
    pub fn write_with<T>(
        &self,
        body: impl FnOnce(&mut dyn Write) -> Result<T>,
    ) -> Result<T> {
        let mut out = open_output(&self.output)?;
        let result = body(&mut out).and_then(|value| {
            out.flush()?;
            Ok(value)
        });
        if let Err(e) = &result {
            let dropped = abandon_output(out);
            error!("Run failed, discarding output ({dropped} buffered bytes): {e:#}");
            discard_output(&self.output);
        }
        result
    }

    /// The output path.
    pub fn path(&self) -> &Path {
        &self.output
    }
}
