#![deny(unsafe_code)]

//! Nucleotide encoding for alignment comparison.
//!
//! This crate provides the byte-per-column code used by every comparison in `alncmp`:
//! - Encoding and decoding of IUPAC nucleotide symbols, gaps and unknowns
//! - Column predicates (`is_different`, `is_same_confirmed`) as single bit tests
//! - Completeness weights for tie-breaking between equally close sequences

pub mod nucleotide;

pub use nucleotide::{decode, encode, is_different, is_same_confirmed, score};
