//! Find the closest target sequence for every query sequence.
//!
//! Both alignments are loaded and encoded up front. Queries are then split into contiguous
//! chunks across the worker pool and compared against the whole target set.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use alncmp_lib::closest::run_closest;
use alncmp_lib::fasta::read_alignment;
use alncmp_lib::io::open_input;
use alncmp_lib::logging::{OperationTimer, log_closest_summary};
use alncmp_lib::validation::{validate_input_exists, validate_single_stdin};

use crate::commands::command::Command;
use crate::commands::common::{OutputOptions, ThreadingOptions};

/// Find the closest target for each query by genetic distance.
#[derive(Debug, Parser)]
#[command(
    name = "closest",
    about = "\x1b[38;5;72m[COMPARISON]\x1b[0m     \x1b[36mFind the closest target for each query sequence\x1b[0m",
    long_about = r#"
Find the closest sequence in a target alignment for every sequence in a query alignment.

Distance is the number of differing columns divided by the number of columns that differ
or match on the same unambiguous base. Columns involving ambiguity codes that share a
possible base, N, '?' or gaps are ignored. Equally close targets are decided by the
completeness score (sum of per-column information), and remaining ties go to the target
that appears first. Targets with an undefined distance only win when no target has a
defined one.

Query and target alignments must have the same width.

Output is a CSV with one row per query, in query order:

  query,closest,SNPdistance,SNPs
  q1,t7,2,10AG;250TC

Each difference is written as <1-based position><query base><target base>.

Example usage:
  alncmp closest -q queries.fasta --target targets.fasta -o closest.csv -t 16
"#
)]
pub struct Closest {
    /// Aligned query FASTA ('-' for stdin)
    #[arg(short = 'q', long = "query")]
    pub query: PathBuf,

    /// Aligned target FASTA ('-' for stdin)
    #[arg(long = "target")]
    pub target: PathBuf,

    /// Output options
    #[command(flatten)]
    pub output: OutputOptions,

    /// Threading options
    #[command(flatten)]
    pub threading: ThreadingOptions,
}

impl Command for Closest {
    fn execute(&self, _command_line: &str) -> Result<()> {
        validate_input_exists(&self.query, "Query alignment")?;
        validate_input_exists(&self.target, "Target alignment")?;
        validate_single_stdin(&[
            (&self.query, "Query alignment"),
            (&self.target, "Target alignment"),
        ])?;
        let threads = self.threading.resolve(None)?;

        info!("Starting Closest");
        info!("Query: {}", self.query.display());
        info!("Target: {}", self.target.display());
        info!("Output: {}", self.output.path().display());

        let timer = OperationTimer::new("Finding closest targets");

        let loader = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to build thread pool")?;
        let queries = read_alignment(open_input(&self.query)?, "query alignment", &loader)?;
        let targets = read_alignment(open_input(&self.target)?, "target alignment", &loader)?;

        // One chunk per worker, so there is no point in more workers than queries
        let workers = self.threading.resolve(Some(queries.len()))?;
        info!("Threads: {workers}");
        let pool = if workers == threads {
            loader
        } else {
            rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()
                .context("Failed to build thread pool")?
        };

        let summary =
            self.output.write_with(|out| Ok(run_closest(&queries, &targets, &pool, out)?))?;

        timer.log_completion(summary.queries);
        log_closest_summary(&summary);
        Ok(())
    }
}
