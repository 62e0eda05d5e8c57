//! Concurrency tests: results must not depend on the number of worker threads.

use alncmp_lib::closest::run_closest;
use alncmp_lib::fasta::read_alignment;
use alncmp_lib::snps::find_snps;

use crate::helpers::fasta_text;

const BASES: &[u8] = b"ACGTNRY-";

/// Deterministic pseudo-random alignment of `count` sequences of `width` columns.
fn alignment(prefix: &str, count: usize, width: usize, seed: u64) -> Vec<(String, String)> {
    let mut state = seed;
    (0..count)
        .map(|i| {
            let sequence: String = (0..width)
                .map(|_| {
                    state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
                    // Mostly A; the rest spread over the alphabet
                    let roll = (state >> 33) % 40;
                    let base = if roll < BASES.len() as u64 { BASES[roll as usize] } else { b'A' };
                    base as char
                })
                .collect();
            (format!("{prefix}{i}"), sequence)
        })
        .collect()
}

fn as_refs(records: &[(String, String)]) -> Vec<(&str, &str)> {
    records.iter().map(|(n, s)| (n.as_str(), s.as_str())).collect()
}

fn snps_output(reference: &str, queries: &str, threads: usize) -> String {
    let mut out = Vec::new();
    find_snps(reference.as_bytes(), queries.as_bytes(), &mut out, threads).unwrap();
    String::from_utf8(out).unwrap()
}

fn closest_output(queries: &str, targets: &str, threads: usize) -> String {
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build().unwrap();
    let queries = read_alignment(queries.as_bytes(), "query alignment", &pool).unwrap();
    let targets = read_alignment(targets.as_bytes(), "target alignment", &pool).unwrap();
    let mut out = Vec::new();
    run_closest(&queries, &targets, &pool, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_snps_output_independent_of_threads() {
    let reference = fasta_text(&as_refs(&alignment("ref", 1, 300, 7)), 60);
    let queries = fasta_text(&as_refs(&alignment("q", 2_000, 300, 11)), 60);

    let single = snps_output(&reference, &queries, 1);
    assert_eq!(single.lines().count(), 2_001);
    for threads in [2, 3, 8, 32] {
        assert_eq!(snps_output(&reference, &queries, threads), single, "threads = {threads}");
    }
}

#[test]
fn test_closest_output_independent_of_threads() {
    let queries = fasta_text(&as_refs(&alignment("q", 101, 120, 3)), 60);
    let targets = fasta_text(&as_refs(&alignment("t", 40, 120, 5)), 60);

    let single = closest_output(&queries, &targets, 1);
    assert_eq!(single.lines().count(), 102);
    for threads in [2, 4, 7, 200] {
        assert_eq!(closest_output(&queries, &targets, threads), single, "threads = {threads}");
    }
}
