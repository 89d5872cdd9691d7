//! Inspect command implementation.
//!
//! The inspect command:
//! 1. Reads and validates the trace
//! 2. Computes summary statistics and optional checks
//! 3. Prints and/or writes the summary

use super::models::InspectArgs;
use crate::aggregator::{
    check_control_ratio, check_wave_sender_coverage, find_timestamp_regression, summarize_trace,
    TraceSummary,
};
use crate::output::write_summary;
use crate::parser::read_trace_csv;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// Execute the inspect command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The computed summary, Err with context if any step fails
///
/// # Errors
/// * Trace read or validation failures
/// * Control ratio outside tolerance
/// * Waves or senders missing from the trace
/// * File write errors
pub fn execute_inspect(args: &InspectArgs) -> Result<TraceSummary> {
    let start_time = Instant::now();

    // Step 1: Read trace
    info!("Step 1/3: Reading trace {}...", args.trace_path.display());
    let result = read_trace_csv(&args.trace_path, &args.read_options)
        .with_context(|| format!("Failed to read trace {}", args.trace_path.display()))?;

    if !args.read_options.enforce_sorted_timestamps {
        if let Some(regression) = find_timestamp_regression(&result.packets) {
            warn!(
                "Trace is not sorted: packet {} starts at {} us after {} us",
                regression.index, regression.current, regression.previous
            );
        }
    }

    // Step 2: Summarize
    info!("Step 2/3: Summarizing {} packets...", result.row_count);
    let summary = summarize_trace(&args.trace_path.display().to_string(), &result);
    debug!("{}", summary.summary());

    if let Some(expected) = args.expected_control_ratio {
        check_control_ratio(&summary, expected, args.ratio_tolerance)
            .context("Control ratio check failed")?;
        info!("✓ Control ratio within {} of {}", args.ratio_tolerance, expected);
    }

    if let (Some(waves), Some(senders)) = (args.expected_waves, args.expected_senders) {
        check_wave_sender_coverage(&result.packets, waves, senders)
            .context("Wave/sender coverage check failed")?;
        info!("✓ All {} waves cover {} senders", waves, senders);
    }

    // Step 3: Output
    info!("Step 3/3: Writing outputs...");
    if let Some(json_path) = &args.output_json {
        write_summary(&summary, json_path).context("Failed to write summary JSON")?;
        info!("✓ Summary written to: {}", json_path.display());
    }

    if args.print_summary {
        print_summary(&summary);
    }

    let elapsed = start_time.elapsed();
    info!("Inspect completed in {:.2}s", elapsed.as_secs_f64());

    Ok(summary)
}

/// Print a text summary to stdout
///
/// **Private** - internal helper for execute_inspect
fn print_summary(summary: &TraceSummary) {
    println!("\n{}", "=".repeat(80));
    println!("TRACE SUMMARY");
    println!("{}", "=".repeat(80));
    println!("Source:        {}", summary.source);
    println!("Packets:       {}", summary.packet_count);
    println!("Bytes:         {}", summary.total_bytes);
    println!("Blank lines:   {}", summary.skipped_rows);
    println!(
        "Control:       {} packets, {} bytes ({:.2}%)",
        summary.control.packets,
        summary.control.bytes,
        summary.control_ratio() * 100.0
    );
    println!(
        "Bulk:          {} packets, {} bytes",
        summary.bulk.packets, summary.bulk.bytes
    );
    println!("Waves:         {}", summary.wave_count);
    println!("Senders:       {}", summary.sender_count);
    match (summary.first_start_us, summary.last_start_us) {
        (Some(first), Some(last)) => {
            println!("Time range:    {} us .. {} us ({} us)", first, last, summary.span_us())
        }
        _ => println!("Time range:    (empty trace)"),
    }
    println!("{}", "=".repeat(80));
}

/// Validate inspect arguments
///
/// **Public** - can be called before execute_inspect for early validation
pub fn validate_inspect_args(args: &InspectArgs) -> Result<()> {
    if args.trace_path.as_os_str().is_empty() {
        anyhow::bail!("Trace path cannot be empty");
    }

    args.read_options.validate()?;

    if let Some(expected) = args.expected_control_ratio {
        if !(0.0..=1.0).contains(&expected) {
            anyhow::bail!("Expected control ratio must be between 0 and 1");
        }
    }

    if !args.ratio_tolerance.is_finite() || args.ratio_tolerance < 0.0 {
        anyhow::bail!("Ratio tolerance must be a finite value >= 0");
    }

    if args.expected_waves.is_some() != args.expected_senders.is_some() {
        anyhow::bail!("Wave and sender counts must be given together");
    }

    Ok(())
}
