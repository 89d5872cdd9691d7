//! CPU FIFO Trace
//!
//! Strict-schema ingestion of packet arrival traces for the CPU FIFO
//! discrete-event queue simulator.
//!
//! A trace is a delimited text file with a fixed 7-column header and one
//! row per packet arrival. [`parser::read_trace_csv`] loads the whole file
//! and validates it: header schema, row shape, cell types and
//! non-decreasing timestamps. Any violation fails the read with a
//! [`utils::TraceError`] naming the line and the offending text.
//!
//! ```ignore
//! use cpu_fifo_trace::parser::{read_trace_csv, TraceReadOptions};
//!
//! let trace = read_trace_csv("trace.csv", &TraceReadOptions::default())?;
//! for packet in &trace.packets {
//!     println!("{} {}", packet.packet_start_us, packet.traffic_class);
//! }
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
