//! Error path integration tests.
//!
//! These tests verify that failed runs exit with an error, report the cause, and leave no
//! output file behind.

use std::process::Output;

use tempfile::TempDir;

use crate::helpers::{run_alncmp, write_fasta};

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ==================== snps ====================

#[test]
fn test_snps_width_mismatch_removes_output() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let reference = write_fasta(dir.path(), "ref.fasta", &[("ref", "ACGT")]);
    let query = write_fasta(
        dir.path(),
        "query.fasta",
        &[("q1", "ACGT"), ("q2", "AGGT"), ("short", "ACG"), ("q4", "ACGT")],
    );
    let output = dir.path().join("snps.csv");

    let result = run_alncmp(&[
        "snps",
        "-r",
        reference.to_str().unwrap(),
        "-q",
        query.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    assert!(!result.status.success());
    assert!(stderr(&result).contains("Alignment width mismatch"), "{}", stderr(&result));
    assert!(stderr(&result).contains("short"));
    assert!(!output.exists(), "Failed run must not leave an output file");
}

#[test]
fn test_snps_failure_writes_nothing_to_stdout() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let reference = write_fasta(dir.path(), "ref.fasta", &[("ref", "ACGT")]);
    let names: Vec<String> = (0..200).map(|i| format!("q{i}")).collect();
    let mut records: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "AGGT")).collect();
    records.push(("long", "AGGTA"));
    let query = write_fasta(dir.path(), "query.fasta", &records);

    for _ in 0..3 {
        let result = run_alncmp(&[
            "snps",
            "-r",
            reference.to_str().unwrap(),
            "-q",
            query.to_str().unwrap(),
            "-t",
            "4",
        ]);
        assert!(!result.status.success());
        assert!(stderr(&result).contains("'long' has 5 columns, expected 4"));
        assert!(result.stdout.is_empty(), "stdout: {}", String::from_utf8_lossy(&result.stdout));
    }
}

#[test]
fn test_snps_reference_without_definition_line() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let reference = dir.path().join("ref.fasta");
    std::fs::write(&reference, "ACGT\n").expect("Failed to write reference");
    let query = write_fasta(dir.path(), "query.fasta", &[("q1", "ACGT")]);
    let output = dir.path().join("snps.csv");

    let result = run_alncmp(&[
        "snps",
        "-r",
        reference.to_str().unwrap(),
        "-q",
        query.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    assert!(!result.status.success());
    assert!(
        stderr(&result).contains("Malformed FASTA record 1"),
        "{}",
        stderr(&result)
    );
    assert!(!output.exists());
}

#[test]
fn test_snps_unsupported_symbol() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let reference = write_fasta(dir.path(), "ref.fasta", &[("ref", "ACGT")]);
    let query = write_fasta(dir.path(), "query.fasta", &[("bad", "ACXT")]);
    let output = dir.path().join("snps.csv");

    let result = run_alncmp(&[
        "snps",
        "-r",
        reference.to_str().unwrap(),
        "-q",
        query.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    assert!(!result.status.success());
    let message = stderr(&result);
    assert!(
        message.contains("Unsupported symbol 'X' at position 3 of sequence 'bad'"),
        "{message}"
    );
    assert!(!output.exists());
}

#[test]
fn test_snps_empty_reference() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let reference = write_fasta(dir.path(), "ref.fasta", &[]);
    let query = write_fasta(dir.path(), "query.fasta", &[("q1", "ACGT")]);
    let output = dir.path().join("snps.csv");

    let result = run_alncmp(&[
        "snps",
        "-r",
        reference.to_str().unwrap(),
        "-q",
        query.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    assert!(!result.status.success());
    assert!(stderr(&result).contains("No sequences found in reference"));
    assert!(!output.exists());
}

#[test]
fn test_snps_missing_reference_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let missing = dir.path().join("missing.fasta");

    let result = run_alncmp(&["snps", "-r", missing.to_str().unwrap(), "-q", "-"]);
    assert!(!result.status.success());
    assert!(stderr(&result).contains("File does not exist"));
}

#[test]
fn test_snps_rejects_zero_threads() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let reference = write_fasta(dir.path(), "ref.fasta", &[("ref", "ACGT")]);
    let query = write_fasta(dir.path(), "query.fasta", &[("q1", "ACGT")]);

    let result = run_alncmp(&[
        "snps",
        "-r",
        reference.to_str().unwrap(),
        "-q",
        query.to_str().unwrap(),
        "-t",
        "0",
    ]);
    assert!(!result.status.success());
    assert!(stderr(&result).contains("threads"));
}

#[test]
fn test_snps_rejects_two_stdin_inputs() {
    let result = run_alncmp(&["snps", "-r", "-", "-q", "/dev/stdin"]);
    assert!(!result.status.success());
    assert!(stderr(&result).contains("Only one input can be read from standard input"));
}

// ==================== closest ====================

#[test]
fn test_closest_width_mismatch_removes_output() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let query = write_fasta(dir.path(), "query.fasta", &[("q1", "ACGT")]);
    let target = write_fasta(dir.path(), "target.fasta", &[("t1", "ACGTA")]);
    let output = dir.path().join("closest.csv");

    let result = run_alncmp(&[
        "closest",
        "-q",
        query.to_str().unwrap(),
        "--target",
        target.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    assert!(!result.status.success());
    assert!(stderr(&result).contains("Alignment width mismatch"));
    assert!(!output.exists());
}

#[test]
fn test_closest_ragged_target_alignment() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let query = write_fasta(dir.path(), "query.fasta", &[("q1", "ACGT")]);
    let target = write_fasta(dir.path(), "target.fasta", &[("t1", "ACGT"), ("t2", "ACG")]);
    let output = dir.path().join("closest.csv");

    let result = run_alncmp(&[
        "closest",
        "-q",
        query.to_str().unwrap(),
        "--target",
        target.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    assert!(!result.status.success());
    assert!(stderr(&result).contains("'t2'"));
    assert!(!output.exists());
}

#[test]
fn test_closest_unsupported_symbol_in_query() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let query = write_fasta(dir.path(), "query.fasta", &[("q1", "ACGT"), ("q2", "ACGJ")]);
    let target = write_fasta(dir.path(), "target.fasta", &[("t1", "ACGT")]);
    let output = dir.path().join("closest.csv");

    let result = run_alncmp(&[
        "closest",
        "-q",
        query.to_str().unwrap(),
        "--target",
        target.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    assert!(!result.status.success());
    assert!(stderr(&result).contains("Unsupported symbol 'J' at position 4 of sequence 'q2'"));
    assert!(!output.exists());
}

#[test]
fn test_closest_empty_target_alignment() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let query = write_fasta(dir.path(), "query.fasta", &[("q1", "ACGT")]);
    let target = write_fasta(dir.path(), "target.fasta", &[]);
    let output = dir.path().join("closest.csv");

    let result = run_alncmp(&[
        "closest",
        "-q",
        query.to_str().unwrap(),
        "--target",
        target.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    assert!(!result.status.success());
    assert!(stderr(&result).contains("No sequences found in target alignment"));
    assert!(!output.exists());
}
