//! Loading of per-sample feature files and the sample manifest.
//!
//! The summarizer only needs, per sample, the mapping loci in abundance order together with
//! each feature's read end points. [`FeatureLoader`] is the seam for that; [`CountXmlLoader`]
//! reads the count XML files written by the small-RNA counting step.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use fgoxide::io::Io;
use log::info;
use serde::Deserialize;

use crate::errors::{Result, SrnaError};
use crate::feature::{EndPoint, FeatureGroup, FeatureRecord, SampleFeatures};

const MANIFEST_FILE_TYPE: &str = "Manifest";
const COUNT_XML_FILE_TYPE: &str = "Count XML";

/// Source of per-sample mapping loci.
pub trait FeatureLoader {
    /// Loads the mapping loci of one feature file, ordered by the sample's abundance ranking.
    ///
    /// # Errors
    ///
    /// Returns [`SrnaError::MissingFile`] if the file cannot be opened and
    /// [`SrnaError::MalformedRecord`] if its content cannot be parsed.
    fn load_features(&self, path: &Path) -> Result<Vec<FeatureGroup>>;
}

/// One `(sample id, feature file)` line of the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub sample_id: String,
    pub path: PathBuf,
}

/// Reads a tab-separated, header-less manifest of `sample id` and `feature file` columns.
///
/// Blank lines are skipped and columns past the second are ignored.
///
/// # Errors
///
/// Returns [`SrnaError::MissingFile`] if the manifest cannot be opened and
/// [`SrnaError::MalformedRecord`] for a line with fewer than two non-empty columns.
pub fn read_manifest(path: &Path) -> Result<Vec<ManifestEntry>> {
    let display = path.display().to_string();
    let reader = Io::default().new_reader(path).map_err(|e| SrnaError::MissingFile {
        file_type: MANIFEST_FILE_TYPE.to_string(),
        path: display.clone(),
        reason: e.to_string(),
    })?;

    let mut entries = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| SrnaError::malformed(MANIFEST_FILE_TYPE, &display, e))?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let mut columns = line.split('\t');
        match (columns.next(), columns.next()) {
            (Some(sample_id), Some(file)) if !sample_id.is_empty() && !file.is_empty() => {
                entries.push(ManifestEntry {
                    sample_id: sample_id.to_string(),
                    path: PathBuf::from(file),
                });
            }
            _ => {
                return Err(SrnaError::malformed(
                    MANIFEST_FILE_TYPE,
                    &display,
                    format!(
                        "line {} must have a sample id and a file path separated by a tab",
                        idx + 1
                    ),
                ));
            }
        }
    }
    Ok(entries)
}

/// Loads every sample of the manifest, in manifest order.
///
/// # Errors
///
/// Returns the first error reported by `loader`.
pub fn load_samples<L: FeatureLoader>(
    entries: &[ManifestEntry],
    loader: &L,
) -> Result<Vec<SampleFeatures>> {
    entries
        .iter()
        .map(|entry| {
            info!("Reading features of {} from {} ...", entry.sample_id, entry.path.display());
            let groups = loader.load_features(&entry.path)?;
            info!("Read {} mapped feature groups for {}", groups.len(), entry.sample_id);
            Ok(SampleFeatures::new(entry.sample_id.clone(), groups))
        })
        .collect()
}

/// Loader for count XML files.
///
/// Only the `subjectResult` section is read:
///
/// ```text
/// subjectResult/subjectGroup               one mapping locus
///   subject/region[@name, @sequence]       one feature, in document order
///     query[@offset, @seq_len, @query_count]
/// ```
///
/// Each query contributes `query_count` reads ending at `offset + seq_len`. Loci are
/// stable-sorted by the read count of their primary feature, highest first. Gzipped files are
/// decompressed transparently.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountXmlLoader;

impl CountXmlLoader {
    /// Parses count XML from any buffered reader; `source` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`SrnaError::MalformedRecord`] if the XML is invalid, an attribute is missing or
    /// not a number, or a locus holds no feature.
    pub fn parse<R: BufRead>(reader: R, source: &str) -> Result<Vec<FeatureGroup>> {
        let document: CountXml = quick_xml::de::from_reader(reader)
            .map_err(|e| SrnaError::malformed(COUNT_XML_FILE_TYPE, source, e))?;

        let mut groups = Vec::new();
        for (idx, group) in document.subject_result.groups.into_iter().enumerate() {
            let features = group
                .subjects
                .into_iter()
                .flat_map(|subject| subject.regions)
                .map(|region| region.into_record(source))
                .collect::<Result<Vec<FeatureRecord>>>()?;
            let group = FeatureGroup::from_features(features).ok_or_else(|| {
                SrnaError::malformed(
                    COUNT_XML_FILE_TYPE,
                    source,
                    format!("subjectGroup {} has no region", idx + 1),
                )
            })?;
            groups.push(group);
        }
        groups.sort_by_key(|g| std::cmp::Reverse(g.primary().total_count()));
        Ok(groups)
    }
}

impl FeatureLoader for CountXmlLoader {
    fn load_features(&self, path: &Path) -> Result<Vec<FeatureGroup>> {
        let display = path.display().to_string();
        let reader = Io::default().new_reader(path).map_err(|e| SrnaError::MissingFile {
            file_type: COUNT_XML_FILE_TYPE.to_string(),
            path: display.clone(),
            reason: e.to_string(),
        })?;
        Self::parse(reader, &display)
    }
}

#[derive(Debug, Deserialize)]
struct CountXml {
    #[serde(rename = "subjectResult", default)]
    subject_result: SubjectResultXml,
}

#[derive(Debug, Default, Deserialize)]
struct SubjectResultXml {
    #[serde(rename = "subjectGroup", default)]
    groups: Vec<SubjectGroupXml>,
}

#[derive(Debug, Deserialize)]
struct SubjectGroupXml {
    #[serde(rename = "subject", default)]
    subjects: Vec<SubjectXml>,
}

#[derive(Debug, Deserialize)]
struct SubjectXml {
    #[serde(rename = "region", default)]
    regions: Vec<RegionXml>,
}

#[derive(Debug, Deserialize)]
struct RegionXml {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@sequence", default)]
    sequence: String,
    #[serde(rename = "query", default)]
    queries: Vec<QueryXml>,
}

#[derive(Debug, Deserialize)]
struct QueryXml {
    #[serde(rename = "@offset")]
    offset: i64,
    #[serde(rename = "@seq_len")]
    seq_len: i64,
    #[serde(rename = "@query_count")]
    query_count: u64,
}

impl RegionXml {
    fn into_record(self, source: &str) -> Result<FeatureRecord> {
        let end_points = self
            .queries
            .iter()
            .map(|q| {
                let position = q.offset.checked_add(q.seq_len).ok_or_else(|| {
                    SrnaError::malformed(
                        COUNT_XML_FILE_TYPE,
                        source,
                        format!(
                            "end position of {} overflows: offset {} + seq_len {}",
                            self.name, q.offset, q.seq_len
                        ),
                    )
                })?;
                Ok(EndPoint::new(position, q.query_count))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(FeatureRecord::new(self.name, self.sequence, end_points))
    }
}
