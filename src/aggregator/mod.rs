//! Aggregation of loaded traces into statistics and sanity checks.
//!
//! This module turns a packet sequence into:
//! - Per-class packet and byte totals
//! - Wave, sender and time-span statistics
//! - Generator-side consistency checks (ordering, control ratio, wave/sender coverage)

pub mod checks;
pub mod summary;

// Re-export main types and functions
pub use checks::{
    check_control_ratio, check_wave_sender_coverage, find_timestamp_regression,
    TimestampRegression,
};
pub use summary::{summarize_packets, summarize_trace, ClassTotals, TraceSummary};
