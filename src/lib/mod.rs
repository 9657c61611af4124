#![deny(unsafe_code)]
// Clippy lint configuration for CI
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args
)]

//! # srnatools - small-RNA read-count summaries
//!
//! This library summarizes per-sample small-RNA feature count files into an end-position
//! report: for every feature, how the ends of its reads are distributed around the feature's
//! dominant end position, with per-sample and group-wide abundance ranks.
//!
//! ## Overview
//!
//! ### Core Functionality
//!
//! - **[`feature`]** - Feature, mapping locus and per-sample data model
//! - **[`aggregate`]** - Merging of top-N end-point counts per feature group across samples
//! - **[`rank`]** - Overall ranks and dominant positions within a group
//! - **[`report`]** - Report rows and TSV output
//!
//! ### Utilities
//!
//! - **[`loader`]** - Sample manifest and count XML loading
//! - **[`validation`]** - Input validation
//! - **[`logging`]** - Run summaries and operation timing
//! - **[`errors`]** - Error types
//!
//! ## Quick Start
//!
//! ```no_run
//! use srnatools_lib::aggregate::GroupAggregator;
//! use srnatools_lib::loader::{CountXmlLoader, load_samples, read_manifest};
//! use srnatools_lib::report::{build_report, write_report};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let entries = read_manifest(Path::new("samples.list"))?;
//! let samples = load_samples(&entries, &CountXmlLoader)?;
//! let aggregates = GroupAggregator::default().aggregate(&samples);
//! let report = build_report(&samples, &aggregates);
//! write_report("endpoints.tsv", &report.rows)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Groups and ranks
//!
//! ```
//! use srnatools_lib::aggregate::GroupAggregator;
//! use srnatools_lib::feature::{EndPoint, FeatureRecord, SampleFeatures};
//! use srnatools_lib::report::build_report;
//!
//! let a = FeatureRecord::new("miR1:a", "", vec![EndPoint::new(0, 5), EndPoint::new(1, 5)]);
//! let b = FeatureRecord::new("miR1:a", "", vec![EndPoint::new(0, 3)]);
//! let samples =
//!     vec![SampleFeatures::new("A", vec![a.into()]), SampleFeatures::new("B", vec![b.into()])];
//!
//! let report = build_report(&samples, &GroupAggregator::default().aggregate(&samples));
//! let row = &report.rows[1];
//! assert_eq!((row.position, row.relative_endpoint), (1, 1));
//! assert_eq!(row.percentage.to_string(), "0.50");
//! ```

pub mod aggregate;
pub mod errors;
pub mod feature;
pub mod loader;
pub mod logging;
pub mod rank;
pub mod report;
pub mod validation;

pub use aggregate::{DEFAULT_TOP_N, GroupAggregator};
pub use feature::GROUP_DELIMITER;
