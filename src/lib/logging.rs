//! Logging helpers for run summaries and timing.

use std::time::{Duration, Instant};

use crate::report::ReportSummary;

/// Formats an integer with thousands separators.
///
/// # Examples
///
/// ```
/// use srnatools_lib::logging::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a duration as seconds, minutes and seconds, or hours and minutes.
///
/// # Examples
///
/// ```
/// use srnatools_lib::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(45)), "45s");
/// assert_eq!(format_duration(Duration::from_secs(135)), "2m 15s");
/// assert_eq!(format_duration(Duration::from_secs(5400)), "1h 30m");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    match secs {
        0..60 => format!("{secs}s"),
        60..3600 if secs % 60 == 0 => format!("{}m", secs / 60),
        60..3600 => format!("{}m {}s", secs / 60, secs % 60),
        _ if (secs % 3600) / 60 == 0 => format!("{}h", secs / 3600),
        _ => format!("{}h {}m", secs / 3600, (secs % 3600) / 60),
    }
}

/// Formats a processing rate of `count` `unit`s over `duration`.
///
/// Rates below one per second are given per minute.
///
/// # Examples
///
/// ```
/// use srnatools_lib::logging::format_rate;
/// use std::time::Duration;
///
/// assert_eq!(format_rate(1000, Duration::from_secs(1), "rows"), "1,000 rows/s");
/// assert_eq!(format_rate(30, Duration::from_secs(60), "rows"), "30.0 rows/min");
/// ```
#[must_use]
pub fn format_rate(count: u64, duration: Duration, unit: &str) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} {unit}/s", format_count(count));
    }
    let rate = count as f64 / secs;
    if rate >= 1.0 {
        format!("{} {unit}/s", format_count(rate as u64))
    } else {
        format!("{:.1} {unit}/min", count as f64 / (secs / 60.0))
    }
}

/// Logs the counts of a finished report.
pub fn log_report_summary(summary: &ReportSummary) {
    log::info!("End Position Summary:");
    log::info!("  Samples: {}", format_count(summary.samples as u64));
    log::info!("  Feature groups: {}", format_count(summary.groups as u64));
    log::info!("  Ranked features: {}", format_count(summary.ranked_features as u64));
    log::info!("  Rows written: {}", format_count(summary.rows as u64));
    if summary.truncated_walks > 0 {
        log::info!(
            "  Sample/group walks stopped at an unranked feature: {}",
            format_count(summary.truncated_walks as u64)
        );
    }
    if summary.empty_features > 0 {
        log::info!(
            "  Ranked features skipped without reads: {}",
            format_count(summary.empty_features as u64)
        );
    }
}

/// Logs the start of an operation and, on request, its completion with elapsed time.
///
/// # Examples
///
/// ```no_run
/// use srnatools_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Summarizing end positions");
/// // ... do work ...
/// timer.log_completion(10_000, "rows");
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs completion with the number of `unit`s produced.
    pub fn log_completion(&self, count: u64, unit: &str) {
        let elapsed = self.elapsed();
        log::info!(
            "{} completed: {} {unit} in {} ({})",
            self.operation,
            format_count(count),
            format_duration(elapsed),
            format_rate(count, elapsed, unit)
        );
    }
}
