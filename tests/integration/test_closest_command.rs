//! End-to-end tests for the `closest` command.

use tempfile::TempDir;

use crate::helpers::{read_lines, run_alncmp, write_fasta};

fn closest_lines(
    dir: &TempDir,
    queries: &[(&str, &str)],
    targets: &[(&str, &str)],
) -> Vec<String> {
    let query = write_fasta(dir.path(), "query.fasta", queries);
    let target = write_fasta(dir.path(), "target.fasta", targets);
    let output = dir.path().join("closest.csv");

    let result = run_alncmp(&[
        "closest",
        "-q",
        query.to_str().unwrap(),
        "--target",
        target.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "-t",
        "2",
    ]);
    assert!(
        result.status.success(),
        "closest failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    read_lines(&output)
}

#[test]
fn test_closest_picks_fewest_differences() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let lines = closest_lines(&dir, &[("q", "AAAA")], &[("t1", "AAAT"), ("t2", "AATT")]);
    assert_eq!(lines, vec!["query,closest,SNPdistance,SNPs", "q,t1,1,4AT"]);
}

#[test]
fn test_closest_tie_broken_by_completeness() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    // Both targets are at distance zero; t2 has no N and wins
    let lines =
        closest_lines(&dir, &[("q", "ACGTACGT")], &[("t1", "ACGTNNGT"), ("t2", "ACGTACGT")]);
    assert_eq!(lines[1], "q,t2,0,");
}

#[test]
fn test_closest_equal_ties_pick_first_target() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let lines = closest_lines(
        &dir,
        &[("q", "ACGT")],
        &[("t1", "ACGA"), ("t2", "ACGC"), ("t3", "ACGG")],
    );
    assert_eq!(lines[1], "q,t1,1,4TA");
}

#[test]
fn test_closest_rows_follow_query_order() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let names: Vec<String> = (0..25).map(|i| format!("q{i}")).collect();
    let queries: Vec<(&str, &str)> = names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), if i % 2 == 0 { "AAAAAAAA" } else { "CCCCCCCC" }))
        .collect();
    let lines = closest_lines(&dir, &queries, &[("ta", "AAAAAAAA"), ("tc", "CCCCCCCC")]);

    assert_eq!(lines.len(), 26);
    for (i, line) in lines.iter().skip(1).enumerate() {
        let expected_target = if i % 2 == 0 { "ta" } else { "tc" };
        assert_eq!(line, &format!("q{i},{expected_target},0,"));
    }
}

#[test]
fn test_closest_undefined_distance_loses() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    // t1 shares no confirmed column with the query; t2 does
    let lines = closest_lines(&dir, &[("q", "ACNN")], &[("t1", "NNGT"), ("t2", "AGGT")]);
    assert_eq!(lines[1], "q,t2,1,2CG");
}
