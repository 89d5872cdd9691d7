//! Summary statistics over a loaded trace.
//!
//! The summary is what the CLI prints and what gets written as JSON next
//! to a trace. It only reads packets; order and contents are untouched.

use crate::parser::schema::{Packet, TrafficClass};
use crate::parser::trace_csv::TraceReadResult;
use crate::utils::config::SUMMARY_SCHEMA_VERSION;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Packet and byte totals for one traffic class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassTotals {
    pub packets: u64,
    pub bytes: u64,
}

impl ClassTotals {
    fn add(&mut self, packet: &Packet) {
        self.packets += 1;
        self.bytes += u64::from(packet.packet_size_bytes);
    }
}

/// Top-level summary structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceSummary {
    /// Schema version for compatibility checking
    pub version: String,

    /// Trace file the summary was computed from
    pub source: String,

    pub packet_count: u64,

    pub total_bytes: u64,

    /// Blank lines skipped while reading
    pub skipped_rows: u64,

    pub control: ClassTotals,

    pub bulk: ClassTotals,

    /// Distinct `wave_id` values
    pub wave_count: u64,

    /// Distinct `sender_id` values
    pub sender_count: u64,

    /// Earliest `packet_start_us`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_start_us: Option<i64>,

    /// Latest `packet_start_us`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_start_us: Option<i64>,

    /// Timestamp when summary was generated
    pub generated_at: String,
}

/// Summarize a read result
///
/// **Public** - main entry point for trace statistics
pub fn summarize_trace(source: &str, result: &TraceReadResult) -> TraceSummary {
    let mut summary = summarize_packets(&result.packets);
    summary.source = source.to_string();
    summary.skipped_rows = result.skipped_rows as u64;
    summary
}

/// Summarize a packet sequence
///
/// **Public** - usable on packets that did not come from a file
pub fn summarize_packets(packets: &[Packet]) -> TraceSummary {
    use chrono::Utc;

    debug!("Summarizing {} packets", packets.len());

    let mut control = ClassTotals::default();
    let mut bulk = ClassTotals::default();
    let mut waves = BTreeSet::new();
    let mut senders = BTreeSet::new();

    for packet in packets {
        match packet.traffic_class {
            TrafficClass::Control => control.add(packet),
            TrafficClass::Bulk => bulk.add(packet),
        }
        waves.insert(packet.wave_id);
        senders.insert(packet.sender_id);
    }

    // Extremes, not first/last: the read may have skipped ordering checks
    let first_start_us = packets.iter().map(|p| p.packet_start_us).min();
    let last_start_us = packets.iter().map(|p| p.packet_start_us).max();

    TraceSummary {
        version: SUMMARY_SCHEMA_VERSION.to_string(),
        source: String::new(),
        packet_count: packets.len() as u64,
        total_bytes: control.bytes + bulk.bytes,
        skipped_rows: 0,
        control,
        bulk,
        wave_count: waves.len() as u64,
        sender_count: senders.len() as u64,
        first_start_us,
        last_start_us,
        generated_at: Utc::now().to_rfc3339(),
    }
}

impl TraceSummary {
    /// Time between earliest and latest arrival, 0 for empty traces
    pub fn span_us(&self) -> i64 {
        match (self.first_start_us, self.last_start_us) {
            (Some(first), Some(last)) => last.saturating_sub(first),
            _ => 0,
        }
    }

    /// Share of packets marked `control`, 0.0 for empty traces
    pub fn control_ratio(&self) -> f64 {
        if self.packet_count == 0 {
            0.0
        } else {
            self.control.packets as f64 / self.packet_count as f64
        }
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and CLI output
    pub fn summary(&self) -> String {
        format!(
            "Packets: {} | Bytes: {} | Control: {} ({:.2}%) | Bulk: {} | Waves: {} | Senders: {} | Span: {} us",
            self.packet_count,
            self.total_bytes,
            self.control.packets,
            self.control_ratio() * 100.0,
            self.bulk.packets,
            self.wave_count,
            self.sender_count,
            self.span_us()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet(ts: i64, wave: u32, sender: u32, size: u32, class: TrafficClass) -> Packet {
        Packet {
            packet_start_us: ts,
            wave_id: wave,
            sender_id: sender,
            packet_index_for_sender: 0,
            packet_size_bytes: size,
            traffic_class: class,
            priority_tag: 0,
        }
    }

    #[test]
    fn test_summarize_packets() {
        let packets = vec![
            packet(0, 0, 0, 512, TrafficClass::Control),
            packet(10, 0, 1, 1500, TrafficClass::Bulk),
            packet(5000, 1, 0, 1500, TrafficClass::Bulk),
            packet(5010, 1, 1, 1500, TrafficClass::Bulk),
        ];

        let summary = summarize_packets(&packets);

        assert_eq!(summary.packet_count, 4);
        assert_eq!(summary.total_bytes, 512 + 3 * 1500);
        assert_eq!(summary.control, ClassTotals { packets: 1, bytes: 512 });
        assert_eq!(summary.bulk.packets, 3);
        assert_eq!(summary.wave_count, 2);
        assert_eq!(summary.sender_count, 2);
        assert_eq!(summary.span_us(), 5010);
        assert_eq!(summary.control_ratio(), 0.25);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize_packets(&[]);
        assert_eq!(summary.packet_count, 0);
        assert_eq!(summary.first_start_us, None);
        assert_eq!(summary.span_us(), 0);
        assert_eq!(summary.control_ratio(), 0.0);
    }

    #[test]
    fn test_summarize_unsorted_uses_extremes() {
        let packets = vec![
            packet(0, 0, 0, 1, TrafficClass::Bulk),
            packet(50, 0, 0, 1, TrafficClass::Bulk),
            packet(30, 0, 0, 1, TrafficClass::Bulk),
        ];
        let summary = summarize_packets(&packets);
        assert_eq!(summary.first_start_us, Some(0));
        assert_eq!(summary.last_start_us, Some(50));
    }

    #[test]
    fn test_summarize_trace_carries_counts() {
        let result = TraceReadResult {
            packets: vec![packet(1, 0, 0, 100, TrafficClass::Control)],
            row_count: 1,
            skipped_rows: 3,
        };
        let summary = summarize_trace("trace.csv", &result);
        assert_eq!(summary.source, "trace.csv");
        assert_eq!(summary.skipped_rows, 3);
        assert!(summary.summary().contains("Control: 1 (100.00%)"));
    }
}
