//! Logging helpers for counts, durations, rates and run summaries.

use std::time::{Duration, Instant};

use crate::closest::ClosestSummary;
use crate::snps::SnpsSummary;

/// Formats a count with thousands separators.
///
/// ```
/// use alncmp_lib::logging::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a fraction (0.0-1.0) as a percentage.
///
/// ```
/// use alncmp_lib::logging::format_percent;
///
/// assert_eq!(format_percent(0.9543, 2), "95.43%");
/// ```
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0, decimals = decimals)
}

/// Formats a duration as e.g. "45s", "2m 15s" or "1h 30m".
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        let (mins, rem) = (secs / 60, secs % 60);
        if rem == 0 { format!("{mins}m") } else { format!("{mins}m {rem}s") }
    } else {
        let (hours, mins) = (secs / 3600, (secs % 3600) / 60);
        if mins == 0 { format!("{hours}h") } else { format!("{hours}h {mins}m") }
    }
}

/// Formats a throughput in sequences per second (or per minute when slow).
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_rate(count: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} sequences/s", format_count(count));
    }

    let rate = count as f64 / secs;
    if rate >= 1.0 {
        format!("{} sequences/s", format_count(rate as u64))
    } else {
        format!("{:.1} sequences/min", count as f64 / (secs / 60.0))
    }
}

/// Logs the summary of a SNPs run.
pub fn log_snps_summary(summary: &SnpsSummary) {
    log::info!("SNPs Summary:");
    log::info!("  Queries: {}", format_count(summary.queries));
    log::info!("  Total SNPs: {}", format_count(summary.total_snps));
    if let Some((query, count)) = &summary.most_snps {
        log::info!("  Most SNPs: {query} ({count})");
    }
}

/// Logs the summary of a closest-match run.
#[allow(clippy::cast_precision_loss)]
pub fn log_closest_summary(summary: &ClosestSummary) {
    log::info!("Closest Match Summary:");
    log::info!("  Queries: {}", format_count(summary.queries));
    if summary.queries > 0 {
        let fraction = summary.tie_breaks as f64 / summary.queries as f64;
        log::info!(
            "  Broken by completeness: {} ({})",
            format_count(summary.tie_breaks),
            format_percent(fraction, 2)
        );
    }
}

/// Times an operation and logs its completion with count and rate.
///
/// ```no_run
/// use alncmp_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Finding SNPs");
/// // ... do work ...
/// timer.log_completion(10_000);
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Starts the timer and logs the start of the operation.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Logs completion with item count, elapsed time and rate.
    pub fn log_completion(&self, count: u64) {
        let duration = self.start_time.elapsed();
        log::info!(
            "{} completed: {} in {} ({})",
            self.operation,
            format_count(count),
            format_duration(duration),
            format_rate(count, duration)
        );
    }
}
