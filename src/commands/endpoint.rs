//! Summarize small-RNA read end positions across samples.
//!
//! Reads a manifest of per-sample count XML files, merges each sample's top-ranked loci per
//! feature group, ranks the features of every group and writes one report row per sample,
//! feature and end position.

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use srnatools_lib::aggregate::GroupAggregator;
use srnatools_lib::loader::{CountXmlLoader, load_samples, read_manifest};
use srnatools_lib::logging::{OperationTimer, log_report_summary};
use srnatools_lib::report::{build_report, write_report};

use crate::commands::command::Command;
use crate::commands::common::ManifestIoOptions;

/// Summarize read end positions of small-RNA features across samples.
#[derive(Debug, Parser)]
#[command(
    name = "endpoint",
    about = "\x1b[38;5;173m[SMALL RNA]\x1b[0m      \x1b[36mSummarize read end positions per feature across samples\x1b[0m",
    long_about = r#"
Summarize the distribution of read end positions of small-RNA features across samples.

The input is a tab-separated manifest without header, one sample per line:

  <sample id>  <count XML file>

Features are grouped by the part of their name before the first ':'. For every group, the
end-point counts of each sample's top 10 loci are merged, and the features of the group are
ranked by merged read count (ties broken by name). Each sample's loci are then reported in
the sample's own order until the first feature without a group rank is reached.

The output is a tab-separated report with one row per sample, feature and end position:

  File              sample id
  Category          feature group
  Feature           feature name
  SampleRank        rank of the feature among the sample's loci in the group
  OverallRank       rank of the feature within the group across samples
  TotalCount        reads of the feature in the sample
  Endposition       end position of the reads
  PositionCount     reads of the feature ending at this position in the sample
  RelativeEndpoint  end position minus the group-wide dominant end position
  Percentage        PositionCount / TotalCount

Example usage:
  srnatools endpoint -i samples.list -o endpoints.tsv
"#
)]
pub struct EndPosition {
    #[command(flatten)]
    pub io: ManifestIoOptions,
}

impl Command for EndPosition {
    fn execute(&self, command_line: &str) -> Result<()> {
        self.io.validate()?;

        let timer = OperationTimer::new("Summarizing end positions");
        debug!("Command line: {command_line}");
        info!("Input: {}", self.io.input.display());
        info!("Output: {}", self.io.output.display());

        let entries = read_manifest(&self.io.input)?;
        info!("Manifest lists {} samples", entries.len());
        let samples = load_samples(&entries, &CountXmlLoader)?;

        let aggregator = GroupAggregator::default();
        let aggregates = aggregator.aggregate(&samples);
        info!(
            "Merged top {} loci per sample into {} feature groups",
            aggregator.top_n(),
            aggregates.len()
        );

        let report = build_report(&samples, &aggregates);
        write_report(&self.io.output, &report.rows)
            .with_context(|| {
                format!("Failed to write end positions for {}", self.io.input.display())
            })?;

        log_report_summary(&report.summary);
        info!("Result has been saved to {}", self.io.output.display());
        timer.log_completion(report.rows.len() as u64, "rows");
        Ok(())
    }
}
