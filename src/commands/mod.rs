//! CLI command implementations for srnatools.
//!
//! ## Small RNA
//! - [`endpoint`] - Summarize read end positions per feature across samples

#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::uninlined_format_args
)]

pub mod command;
pub mod common;
pub mod endpoint;
