//! Report the SNPs of every aligned sequence relative to a reference.
//!
//! Queries are streamed: rows are computed on a worker pool and written in input order as
//! soon as they are ready, so memory stays bounded by the number of rows in flight.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use alncmp_lib::io::open_input;
use alncmp_lib::logging::{OperationTimer, log_snps_summary};
use alncmp_lib::snps::find_snps;
use alncmp_lib::validation::{validate_input_exists, validate_single_stdin};

use crate::commands::command::Command;
use crate::commands::common::{OutputOptions, ThreadingOptions};

/// Find SNPs of each sequence in an alignment relative to a reference.
#[derive(Debug, Parser)]
#[command(
    name = "snps",
    about = "\x1b[38;5;72m[COMPARISON]\x1b[0m     \x1b[36mFind SNPs relative to a reference sequence\x1b[0m",
    long_about = r#"
Find the SNPs of every sequence in an alignment relative to a reference sequence.

The reference is the first record of the reference FASTA; any further records are ignored.
Every query sequence must have the same width as the reference. A column is reported as a
SNP only when the reference and query codes share no possible base, so ambiguity codes,
N, '?' and gaps never produce a SNP on their own.

Output is a CSV with one row per query, in query order:

  query,SNPs
  seq1,C2G|T100A
  seq2,

Each SNP is written as <reference base><1-based position><query base>.

If any query fails (unsupported symbol or width mismatch) the run stops and the output
file is removed.

Example usage:
  alncmp snps -r reference.fasta -q alignment.fasta -o snps.csv
  cat alignment.fasta | alncmp snps -r reference.fasta -t 8 > snps.csv
"#
)]
pub struct Snps {
    /// Reference FASTA (first record is used)
    #[arg(short = 'r', long = "reference")]
    pub reference: PathBuf,

    /// Aligned query FASTA ('-' for stdin)
    #[arg(short = 'q', long = "query", default_value = "-")]
    pub query: PathBuf,

    /// Output options
    #[command(flatten)]
    pub output: OutputOptions,

    /// Threading options
    #[command(flatten)]
    pub threading: ThreadingOptions,
}

impl Command for Snps {
    fn execute(&self, _command_line: &str) -> Result<()> {
        validate_input_exists(&self.reference, "Reference FASTA")?;
        validate_input_exists(&self.query, "Query alignment")?;
        validate_single_stdin(&[
            (&self.reference, "Reference FASTA"),
            (&self.query, "Query alignment"),
        ])?;
        let threads = self.threading.resolve(None)?;

        info!("Starting Snps");
        info!("Reference: {}", self.reference.display());
        info!("Query: {}", self.query.display());
        info!("Output: {}", self.output.path().display());
        info!("Threads: {threads}");

        let timer = OperationTimer::new("Finding SNPs");

        let reference = open_input(&self.reference)?;
        let queries = open_input(&self.query)?;
        let summary =
            self.output.write_with(|out| Ok(find_snps(reference, queries, out, threads)?))?;

        timer.log_completion(summary.queries);
        log_snps_summary(&summary);
        Ok(())
    }
}
