//! End-to-end tests for the `snps` command.

use tempfile::TempDir;

use crate::helpers::{read_lines, run_alncmp, write_fasta};

#[test]
fn test_snps_single_substitution() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let reference = write_fasta(dir.path(), "ref.fasta", &[("ref", "ACGT")]);
    let query = write_fasta(dir.path(), "query.fasta", &[("query_name", "AGGT")]);
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
    assert!(result.status.success(), "snps failed: {}", String::from_utf8_lossy(&result.stderr));
    assert_eq!(read_lines(&output), vec!["query,SNPs", "query_name,C2G"]);
}

#[test]
fn test_snps_rows_follow_query_order() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let reference = write_fasta(dir.path(), "ref.fasta", &[("ref", "ACGTACGTAC")]);
    let query = write_fasta(
        dir.path(),
        "query.fasta",
        &[
            ("s1", "ACGTACGTAC"),
            ("s2 second sequence", "TCGTACGTAG"),
            ("s3", "ACGTNNNTAC"),
            ("s4", "ACRTAC-TAC"),
            ("s5", "acgtacgtaa"),
        ],
    );
    let output = dir.path().join("snps.csv");

    let result = run_alncmp(&[
        "snps",
        "--reference",
        reference.to_str().unwrap(),
        "--query",
        query.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--threads",
        "3",
    ]);
    assert!(result.status.success());
    assert_eq!(
        read_lines(&output),
        vec!["query,SNPs", "s1,", "s2,A1T|C10G", "s3,", "s4,", "s5,C10A"]
    );
}

#[test]
fn test_snps_writes_to_stdout() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let reference = write_fasta(dir.path(), "ref.fasta", &[("ref", "ACGTACGT")]);
    let query = write_fasta(dir.path(), "query.fasta", &[("q1", "ACGTACGA")]);

    let result = run_alncmp(&[
        "snps",
        "-r",
        reference.to_str().unwrap(),
        "-q",
        query.to_str().unwrap(),
    ]);
    assert!(result.status.success());
    assert_eq!(String::from_utf8(result.stdout).unwrap(), "query,SNPs\nq1,T8A\n");
}

#[test]
fn test_snps_empty_query_file_writes_header_only() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let reference = write_fasta(dir.path(), "ref.fasta", &[("ref", "ACGT")]);
    let query = write_fasta(dir.path(), "query.fasta", &[]);
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
    assert!(result.status.success());
    assert_eq!(read_lines(&output), vec!["query,SNPs"]);
}
