//! Count XML and manifest fixture writers.

#![allow(dead_code)]

use fgoxide::io::Io;
use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// One read sequence mapped to a feature: `offset`, `seq_len`, `query_count`.
pub type Query = (i64, i64, u64);

/// A mapping locus: `(feature name, queries)` for each feature, primary first.
pub type Locus<'a> = Vec<(&'a str, Vec<Query>)>;

const SEQUENCE: &str = "UGGAAUGUAAAGAAGUAUGUAU";

/// Renders a count XML document with one `subjectGroup` per locus, in the given order.
pub fn count_xml(loci: &[Locus<'_>]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    xml.push_str("<root>\n  <subjectResult>\n");
    for locus in loci {
        xml.push_str("    <subjectGroup>\n");
        for (name, queries) in locus {
            let subject = name.split(':').next().unwrap_or(name);
            writeln!(xml, "      <subject name=\"{subject}\">").unwrap();
            writeln!(xml, "        <region name=\"{name}\" sequence=\"{SEQUENCE}\">").unwrap();
            for (i, (offset, seq_len, count)) in queries.iter().enumerate() {
                writeln!(
                    xml,
                    "          <query qname=\"q{i}\" offset=\"{offset}\" seq_len=\"{seq_len}\" \
                     query_count=\"{count}\"/>"
                )
                .unwrap();
            }
            xml.push_str("        </region>\n      </subject>\n");
        }
        xml.push_str("    </subjectGroup>\n");
    }
    xml.push_str("  </subjectResult>\n</root>\n");
    xml
}

/// Shorthand for a locus holding a single feature.
pub fn single(name: &str, queries: Vec<Query>) -> Locus<'_> {
    vec![(name, queries)]
}

/// Writes a count XML file; `.gz` paths are gzip-compressed.
pub fn write_count_xml(path: &Path, loci: &[Locus<'_>]) {
    let mut writer = Io::default().new_writer(path).expect("Failed to create count XML");
    writer.write_all(count_xml(loci).as_bytes()).expect("Failed to write count XML");
    writer.flush().expect("Failed to flush count XML");
}

/// Writes a tab-separated manifest of `(sample id, path)` lines.
pub fn write_manifest(path: &Path, samples: &[(&str, &Path)]) {
    let content: String =
        samples.iter().map(|(id, file)| format!("{id}\t{}\n", file.display())).collect();
    fs::write(path, content).expect("Failed to write manifest");
}

/// Runs `srnatools endpoint` and returns the process output.
pub fn run_endpoint(manifest: &Path, output: &PathBuf) -> Output {
    Command::new(env!("CARGO_BIN_EXE_srnatools"))
        .arg("endpoint")
        .args(["--input", manifest.to_str().unwrap()])
        .args(["--output", output.to_str().unwrap()])
        .output()
        .expect("Failed to run endpoint command")
}

/// Reads the report into header and data rows split on tabs.
pub fn read_report(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let content = fs::read_to_string(path).expect("Failed to read report");
    let mut lines = content.lines().map(|l| l.split('\t').map(str::to_string).collect::<Vec<_>>());
    let header = lines.next().expect("Report has no header");
    (header, lines.collect())
}
