//! End-to-end CLI tests for the endpoint command.
//!
//! These tests run the actual `srnatools endpoint` binary and validate:
//! 1. Report layout and per-row statistics
//! 2. Group, sample and sample-rank ordering
//! 3. Truncation at the first unranked feature
//! 4. Gzipped input and reproducible output

use std::fs;
use tempfile::TempDir;

use crate::helpers::{Locus, read_report, run_endpoint, single, write_count_xml, write_manifest};

const HEADER: &str = concat!(
    "File\tCategory\tFeature\tSampleRank\tOverallRank\tTotalCount\t",
    "Endposition\tPositionCount\tRelativeEndpoint\tPercentage"
);

/// Two samples sharing one feature: merged counts pick the dominant end.
#[test]
fn test_endpoint_command_basic() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("A.count.xml");
    let b = temp_dir.path().join("B.count.xml");
    let manifest = temp_dir.path().join("samples.list");
    let output = temp_dir.path().join("endpoints.tsv");

    // A: five reads ending at 22, five at 23. B: three at 22.
    write_count_xml(&a, &[single("miR-1a:MIMAT1", vec![(0, 22, 5), (1, 22, 5)])]);
    write_count_xml(&b, &[single("miR-1a:MIMAT1", vec![(0, 22, 3)])]);
    write_manifest(&manifest, &[("A", &a), ("B", &b)]);

    let result = run_endpoint(&manifest, &output);
    assert!(
        result.status.success(),
        "endpoint failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let content = fs::read_to_string(&output).unwrap();
    let expected = format!(
        "{HEADER}\n\
         A\tmiR-1a\tmiR-1a:MIMAT1\t1\t1\t10\t22\t5\t0\t0.50\n\
         A\tmiR-1a\tmiR-1a:MIMAT1\t1\t1\t10\t23\t5\t1\t0.50\n\
         B\tmiR-1a\tmiR-1a:MIMAT1\t1\t1\t3\t22\t3\t0\t1.00\n"
    );
    assert_eq!(content, expected);
}

/// Groups sorted by key, samples in manifest order, loci in each sample's own order.
#[test]
fn test_endpoint_command_ordering_and_ranks() {
    let temp_dir = TempDir::new().unwrap();
    let s1 = temp_dir.path().join("s1.count.xml");
    let s2 = temp_dir.path().join("s2.count.xml");
    let manifest = temp_dir.path().join("samples.list");
    let output = temp_dir.path().join("endpoints.tsv");

    write_count_xml(
        &s1,
        &[
            single("miR-2:b", vec![(0, 20, 40)]),
            single("let-7:a", vec![(0, 21, 30)]),
            single("miR-2:a", vec![(0, 20, 10), (0, 21, 10)]),
        ],
    );
    write_count_xml(&s2, &[single("miR-2:a", vec![(0, 19, 40)])]);
    // s2 listed first in the manifest.
    write_manifest(&manifest, &[("s2", &s2), ("s1", &s1)]);

    let result = run_endpoint(&manifest, &output);
    assert!(
        result.status.success(),
        "endpoint failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let (header, rows) = read_report(&output);
    assert_eq!(header.join("\t"), HEADER);
    let keys: Vec<_> = rows
        .iter()
        .map(|r| (r[1].as_str(), r[0].as_str(), r[2].as_str(), r[3].as_str(), r[4].as_str()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("let-7", "s1", "let-7:a", "1", "1"),
            // miR-2:a merged 60 beats miR-2:b 40
            ("miR-2", "s2", "miR-2:a", "1", "1"),
            ("miR-2", "s1", "miR-2:b", "1", "2"),
            ("miR-2", "s1", "miR-2:a", "2", "1"),
            ("miR-2", "s1", "miR-2:a", "2", "1"),
        ]
    );

    // miR-2:a merged counts: 19 -> 40, 20 -> 10, 21 -> 10; dominant end is 19.
    let s1_a: Vec<_> = rows.iter().filter(|r| r[0] == "s1" && r[2] == "miR-2:a").collect();
    assert_eq!(s1_a[0][6..], ["20", "10", "1", "0.50"]);
    assert_eq!(s1_a[1][6..], ["21", "10", "2", "0.50"]);
}

/// A sample's eleventh locus is outside every top-10 and ends its walk through the group.
#[test]
fn test_endpoint_command_stops_at_unranked_feature() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("A.count.xml");
    let b = temp_dir.path().join("B.count.xml");
    let manifest = temp_dir.path().join("samples.list");
    let output = temp_dir.path().join("endpoints.tsv");

    let names: Vec<String> = (1..=11).map(|i| format!("miR-9:f{i:02}")).collect();
    let mut loci: Vec<Locus<'_>> =
        names.iter().enumerate().map(|(i, n)| single(n, vec![(0, 22, 100 - i as u64)])).collect();
    loci.push(single("miR-9:z", vec![(0, 22, 1)]));
    write_count_xml(&a, &loci);
    write_count_xml(&b, &[single("miR-9:z", vec![(0, 22, 500)])]);
    write_manifest(&manifest, &[("A", &a), ("B", &b)]);

    let result = run_endpoint(&manifest, &output);
    assert!(
        result.status.success(),
        "endpoint failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let (_, rows) = read_report(&output);
    let a_features: Vec<_> = rows.iter().filter(|r| r[0] == "A").map(|r| r[2].as_str()).collect();
    assert_eq!(a_features.len(), 10);
    assert_eq!(a_features.last(), Some(&"miR-9:f10"));
    assert!(!a_features.contains(&"miR-9:z"));

    let b_row = rows.iter().find(|r| r[0] == "B").unwrap();
    assert_eq!((b_row[2].as_str(), b_row[4].as_str()), ("miR-9:z", "1"));
}

/// Gzipped feature files are read transparently.
#[test]
fn test_endpoint_command_gzipped_input() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("A.count.xml.gz");
    let manifest = temp_dir.path().join("samples.list");
    let output = temp_dir.path().join("endpoints.tsv");

    write_count_xml(&a, &[single("tRNA-Gly:1", vec![(0, 30, 2), (0, 31, 6)])]);
    write_manifest(&manifest, &[("A", &a)]);

    let result = run_endpoint(&manifest, &output);
    assert!(
        result.status.success(),
        "endpoint failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let (_, rows) = read_report(&output);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][6..], ["30", "2", "-1", "0.25"]);
    assert_eq!(rows[1][6..], ["31", "6", "0", "0.75"]);
}

/// Running twice on the same input gives byte-identical reports.
#[test]
fn test_endpoint_command_is_reproducible() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("A.count.xml");
    let b = temp_dir.path().join("B.count.xml");
    let manifest = temp_dir.path().join("samples.list");
    let first = temp_dir.path().join("first.tsv");
    let second = temp_dir.path().join("second.tsv");

    write_count_xml(
        &a,
        &[
            single("miR-3:a", vec![(0, 22, 3), (2, 20, 3)]),
            single("miR-3:b", vec![(0, 21, 3)]),
            single("let-7:c", vec![(1, 21, 1)]),
        ],
    );
    write_count_xml(
        &b,
        &[single("miR-3:b", vec![(0, 20, 3)]), single("miR-4:a", vec![(0, 22, 8)])],
    );
    write_manifest(&manifest, &[("A", &a), ("B", &b)]);

    assert!(run_endpoint(&manifest, &first).status.success());
    assert!(run_endpoint(&manifest, &second).status.success());
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

/// Samples without any loci still produce a report with a header.
#[test]
fn test_endpoint_command_empty_samples() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("A.count.xml");
    let manifest = temp_dir.path().join("samples.list");
    let output = temp_dir.path().join("endpoints.tsv");

    write_count_xml(&a, &[]);
    write_manifest(&manifest, &[("A", &a)]);

    let result = run_endpoint(&manifest, &output);
    assert!(
        result.status.success(),
        "endpoint failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    assert_eq!(fs::read_to_string(&output).unwrap(), format!("{HEADER}\n"));
}
