//! End-position report rows and TSV output.
//!
//! The report has one row per `(sample, feature, position)`. Groups are visited in ascending
//! group-key order, samples in input order, and each sample's matching loci in the sample's
//! own rank order. A sample's walk through a group stops at the first feature that has no
//! overall rank in that group.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};
use fgoxide::io::Io;
use log::debug;
use serde::{Serialize, Serializer};

use crate::aggregate::GroupAggregates;
use crate::feature::SampleFeatures;
use crate::rank::GroupRanking;

/// Column names of the report, in output order.
pub const REPORT_HEADER: [&str; 10] = [
    "File",
    "Category",
    "Feature",
    "SampleRank",
    "OverallRank",
    "TotalCount",
    "Endposition",
    "PositionCount",
    "RelativeEndpoint",
    "Percentage",
];

/// Formats `numerator / denominator` with two decimals, rounding half away from zero.
///
/// The rounding is done on the integers so that values such as 1/8 always render the same way.
/// Returns `None` for a zero denominator.
///
/// # Examples
///
/// ```
/// use srnatools_lib::report::format_fraction;
///
/// assert_eq!(format_fraction(5, 10).as_deref(), Some("0.50"));
/// assert_eq!(format_fraction(1, 8).as_deref(), Some("0.13"));
/// assert_eq!(format_fraction(2, 3).as_deref(), Some("0.67"));
/// assert_eq!(format_fraction(1, 0), None);
/// ```
#[must_use]
pub fn format_fraction(numerator: u64, denominator: u64) -> Option<String> {
    if denominator == 0 {
        return None;
    }
    let (n, d) = (u128::from(numerator), u128::from(denominator));
    let hundredths = (200 * n + d) / (2 * d);
    Some(format!("{}.{:02}", hundredths / 100, hundredths % 100))
}

/// Share of a feature's reads that end at one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    pub numerator: u64,
    pub denominator: u64,
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_fraction(self.numerator, self.denominator).unwrap_or_default())
    }
}

impl Serialize for Fraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One line of the end-position report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointRow {
    /// Sample identifier from the manifest
    #[serde(rename = "File")]
    pub sample: String,
    /// Group key
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Feature")]
    pub feature: String,
    /// 1-based position of the feature among the sample's loci matching the group
    #[serde(rename = "SampleRank")]
    pub sample_rank: usize,
    #[serde(rename = "OverallRank")]
    pub overall_rank: usize,
    /// Reads of this feature in this sample
    #[serde(rename = "TotalCount")]
    pub total_count: u64,
    #[serde(rename = "Endposition")]
    pub position: i64,
    #[serde(rename = "PositionCount")]
    pub position_count: u64,
    /// `position` minus the group-wide dominant position of the feature
    #[serde(rename = "RelativeEndpoint")]
    pub relative_endpoint: i64,
    #[serde(rename = "Percentage")]
    pub percentage: Fraction,
}

/// Counts describing one report run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub samples: usize,
    pub groups: usize,
    /// Features ranked across all groups
    pub ranked_features: usize,
    pub rows: usize,
    /// Sample/group walks stopped at an unranked feature
    pub truncated_walks: usize,
    /// Ranked features that produced no rows because they had no reads
    pub empty_features: usize,
}

/// Report rows plus the run summary.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub rows: Vec<EndpointRow>,
    pub summary: ReportSummary,
}

/// Ranks every group and emits the report rows.
#[must_use]
pub fn build_report(samples: &[SampleFeatures], aggregates: &GroupAggregates) -> Report {
    let mut report = Report::default();
    report.summary.samples = samples.len();
    report.summary.groups = aggregates.len();

    for (key, merged) in aggregates.iter() {
        let ranking = GroupRanking::from_merged(merged);
        report.summary.ranked_features += ranking.len();
        for sample in samples {
            debug!("Writing {key} in {} ...", sample.sample_id());
            emit_sample_group(sample, key, &ranking, &mut report);
        }
    }

    report.summary.rows = report.rows.len();
    report
}

/// Emits the rows of one sample within one group.
fn emit_sample_group(
    sample: &SampleFeatures,
    key: &str,
    ranking: &GroupRanking,
    report: &mut Report,
) {
    for (idx, record) in sample.primaries_matching(key).enumerate() {
        let Some(ranked) = ranking.get(record.name()) else {
            debug!(
                "Stopping {key} in {} at unranked feature {} (sample rank {})",
                sample.sample_id(),
                record.name(),
                idx + 1
            );
            report.summary.truncated_walks += 1;
            return;
        };

        let total_count = record.total_count();
        let Some(dominant) = ranked.dominant_position.filter(|_| total_count > 0) else {
            report.summary.empty_features += 1;
            continue;
        };

        for (position, position_count) in record.position_counts() {
            report.rows.push(EndpointRow {
                sample: sample.sample_id().to_string(),
                category: key.to_string(),
                feature: record.name().to_string(),
                sample_rank: idx + 1,
                overall_rank: ranked.overall_rank,
                total_count,
                position,
                position_count,
                relative_endpoint: position.saturating_sub(dominant),
                percentage: Fraction { numerator: position_count, denominator: total_count },
            });
        }
    }
}

/// Writes the report as a TSV file with a header line.
///
/// The header is written even when there are no rows. Fields are written verbatim, without
/// quoting. Paths ending in `.gz` are gzip-compressed.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_report<P: AsRef<Path>>(path: P, rows: &[EndpointRow]) -> Result<()> {
    let path_ref = path.as_ref();
    let output = Io::default()
        .new_writer(path_ref)
        .with_context(|| format!("Failed to create report: {}", path_ref.display()))?;
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(output);

    writer
        .write_record(REPORT_HEADER)
        .with_context(|| format!("Failed to write report: {}", path_ref.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write report: {}", path_ref.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write report: {}", path_ref.display()))
}
