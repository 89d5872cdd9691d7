//! Trace parsing and schema definitions.
//!
//! This module handles:
//! - Defining the packet record and column schema
//! - Tokenizing lines and converting cells
//! - Reading and validating complete trace files

pub mod fields;
pub mod schema;
pub mod trace_csv;

// Re-export main types
pub use schema::{Packet, TrafficClass, UnknownTrafficClass, TRACE_COLUMNS, TRACE_FIELD_COUNT};
pub use trace_csv::{read_trace_csv, read_trace_from_reader, TraceReadOptions, TraceReadResult};
