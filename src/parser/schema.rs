//! Trace data model: packet records and the fixed column schema.
//!
//! A trace row maps one-to-one onto [`Packet`]. Column order in the file
//! is the order of [`TRACE_COLUMNS`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of cells in every header and data row
pub const TRACE_FIELD_COUNT: usize = 7;

/// Expected header, compared index-by-index
pub const TRACE_COLUMNS: [&str; TRACE_FIELD_COUNT] = [
    "packet_start_us",
    "wave_id",
    "sender_id",
    "packet_index_for_sender",
    "packet_size_bytes",
    "traffic_class",
    "priority_tag",
];

/// Traffic class of a packet
///
/// Encoded in traces as the exact lowercase words `bulk` and `control`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficClass {
    Bulk,
    Control,
}

impl TrafficClass {
    /// Literal spelling used in trace files
    pub fn as_str(self) -> &'static str {
        match self {
            TrafficClass::Bulk => "bulk",
            TrafficClass::Control => "control",
        }
    }
}

impl fmt::Display for TrafficClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text that is neither `bulk` nor `control`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTrafficClass(pub String);

impl fmt::Display for UnknownTrafficClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown traffic class '{}' (expected 'bulk' or 'control')",
            self.0
        )
    }
}

impl std::error::Error for UnknownTrafficClass {}

impl FromStr for TrafficClass {
    type Err = UnknownTrafficClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bulk" => Ok(TrafficClass::Bulk),
            "control" => Ok(TrafficClass::Control),
            other => Err(UnknownTrafficClass(other.to_string())),
        }
    }
}

/// One packet arrival event from a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Packet {
    /// Arrival time in microseconds
    pub packet_start_us: i64,

    /// Incast wave this packet belongs to
    pub wave_id: u32,

    /// Sending host within the wave
    pub sender_id: u32,

    /// Sequence index of the packet for its sender
    pub packet_index_for_sender: u32,

    /// Size on the wire
    pub packet_size_bytes: u32,

    pub traffic_class: TrafficClass,

    /// DSCP-style priority marking
    pub priority_tag: u8,
}
