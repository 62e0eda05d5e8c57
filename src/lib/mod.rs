#![deny(unsafe_code)]
// Clippy lint configuration for CI
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

//! # alncmp - Nucleotide-resolution alignment comparison
//!
//! This library compares sequences of a multiple sequence alignment column by column
//! using a one-byte-per-column nucleotide code, and builds two workloads on top of that:
//! SNPs of every sequence against a reference, and the closest target for every query.
//!
//! ## Overview
//!
//! ### Core Functionality
//!
//! - **[`fasta`]** - Reading FASTA alignments, encoding, width validation
//! - **[`compare`]** - Pairwise distance and differing columns
//! - **[`completeness`]** - Completeness scores used to break distance ties
//! - **[`closest`]** - Closest-match selection and the chunked batch runner
//! - **[`snps`]** - Streaming SNPs-vs-reference workload
//!
//! ### Concurrency
//!
//! - **[`pipeline`]** - Unordered parallel compute with ordered emit
//! - **[`reorder_buffer`]** - Index-keyed buffer restoring input order
//!
//! ### Utilities
//!
//! - **[`io`]** - Opening files and standard streams
//! - **[`validation`]** - Parameter validation
//! - **[`progress`]** - Progress tracking and logging
//! - **[`logging`]** - Formatting helpers and run summaries
//! - **[`errors`]** - Error types
//!
//! ## Quick Start
//!
//! ```
//! use alncmp_lib::snps::find_snps;
//!
//! # fn main() -> anyhow::Result<()> {
//! let reference = ">ref\nACGT\n";
//! let queries = ">q1\nAGGT\n>q2\nACGT\n";
//! let mut out = Vec::new();
//!
//! find_snps(reference.as_bytes(), queries.as_bytes(), &mut out, 2)?;
//! assert_eq!(String::from_utf8(out)?, "query,SNPs\nq1,C2G\nq2,\n");
//! # Ok(())
//! # }
//! ```

pub mod closest;
pub mod compare;
pub mod completeness;
pub mod errors;
pub mod fasta;
pub mod io;
pub mod logging;
pub mod pipeline;
pub mod progress;
pub mod reorder_buffer;
pub mod snps;
pub mod validation;

pub use alncmp_dna::nucleotide;
pub use errors::{AlnError, Result};
