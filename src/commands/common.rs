//! Common CLI options shared across commands.
//!
//! This module provides shared argument structures that can be composed into
//! command structs using `#[command(flatten)]`.

use std::path::PathBuf;

use clap::Args;

use srnatools_lib::validation::validate_file_exists;

/// Input manifest and output report options.
#[derive(Debug, Clone, Args)]
pub struct ManifestIoOptions {
    /// Tab-separated manifest of sample id and feature file path, one sample per line
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output report file (tab-separated)
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

impl ManifestIoOptions {
    /// Validates that the manifest exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest does not exist.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_file_exists(&self.input, "Manifest")?;
        Ok(())
    }
}
