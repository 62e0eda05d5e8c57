//! CLI command implementations for alncmp.
//!
//! - [`snps`] - SNPs of every sequence in an alignment relative to a reference
//! - [`closest`] - Closest target sequence for every query, ties broken by completeness

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod closest;
pub mod command;
pub mod common;
pub mod snps;
