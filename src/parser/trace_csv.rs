//! Trace CSV reader.
//!
//! Loads a complete packet trace into memory and validates it on the way:
//! header schema, row shape, cell types and timestamp ordering. The first
//! violation aborts the read; no partial result is ever returned.

use super::fields::{
    is_blank_line, parse_signed, parse_traffic_class, parse_u32_field, parse_u8_field, split_line,
};
use super::schema::{Packet, TRACE_COLUMNS, TRACE_FIELD_COUNT};
use crate::utils::config::DEFAULT_DELIMITER;
use crate::utils::error::TraceError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Options for a single read call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceReadOptions {
    /// Require the first non-blank line to be the exact column header
    pub enforce_header: bool,

    /// Reject rows whose timestamp is below the previous row's
    pub enforce_sorted_timestamps: bool,

    /// Cell separator
    pub delimiter: char,

    /// Fail instead of truncating when an unsigned cell overflows its field
    pub reject_out_of_range: bool,
}

impl Default for TraceReadOptions {
    fn default() -> Self {
        Self {
            enforce_header: true,
            enforce_sorted_timestamps: true,
            delimiter: DEFAULT_DELIMITER,
            reject_out_of_range: false,
        }
    }
}

impl TraceReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, enforce: bool) -> Self {
        self.enforce_header = enforce;
        self
    }

    pub fn with_sorted_timestamps(mut self, enforce: bool) -> Self {
        self.enforce_sorted_timestamps = enforce;
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_reject_out_of_range(mut self, reject: bool) -> Self {
        self.reject_out_of_range = reject;
        self
    }

    /// Check that the options can describe a line-oriented file
    pub fn validate(&self) -> Result<(), TraceError> {
        if matches!(self.delimiter, '\n' | '\r') {
            return Err(TraceError::InvalidOptions(format!(
                "delimiter {:?} is a line terminator",
                self.delimiter
            )));
        }
        Ok(())
    }
}

/// Packets loaded from one trace, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceReadResult {
    pub packets: Vec<Packet>,

    /// Number of data rows parsed (always `packets.len()`)
    pub row_count: usize,

    /// Number of blank lines skipped
    pub skipped_rows: usize,
}

impl TraceReadResult {
    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }
}

/// Read and validate a trace CSV file
///
/// **Public** - main entry point for trace ingestion
///
/// # Arguments
/// * `path` - Trace file to load
/// * `options` - Header, ordering, delimiter and range policy
///
/// # Returns
/// Every data row as a [`Packet`], plus row and blank-line counts
///
/// # Errors
/// * `TraceError::Open` / `TraceError::Read` - file cannot be opened or read
/// * `TraceError::HeaderFieldCount` / `TraceError::HeaderField` - header mismatch
/// * `TraceError::FieldCount` - data row without exactly 7 cells
/// * `TraceError::InvalidInteger` / `TraceError::InvalidTrafficClass` - bad cell
/// * `TraceError::TimestampRegression` - `packet_start_us` went backwards
pub fn read_trace_csv(
    path: impl AsRef<Path>,
    options: &TraceReadOptions,
) -> Result<TraceReadResult, TraceError> {
    let path = path.as_ref();
    info!("Reading trace: {}", path.display());

    let file = File::open(path).map_err(|source| TraceError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let result =
        read_trace_from_reader(BufReader::new(file), &path.display().to_string(), options)?;

    info!(
        "Loaded {} packets from {} ({} blank lines skipped)",
        result.row_count,
        path.display(),
        result.skipped_rows
    );

    Ok(result)
}

/// Read and validate a trace from any buffered source
///
/// **Public** - same rules as [`read_trace_csv`]; `source` names the input
/// in I/O errors.
pub fn read_trace_from_reader(
    reader: impl BufRead,
    source: &str,
    options: &TraceReadOptions,
) -> Result<TraceReadResult, TraceError> {
    options.validate()?;

    let mut result = TraceReadResult::default();
    let mut header_processed = false;
    let mut previous_ts: Option<i64> = None;

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source_err| TraceError::Read {
            path: source.to_string(),
            line: line_no,
            source: source_err,
        })?;

        if is_blank_line(&line) {
            result.skipped_rows += 1;
            continue;
        }

        let cells = split_line(&line, options.delimiter);

        if !header_processed {
            header_processed = true;
            if options.enforce_header {
                validate_header(&cells, line_no)?;
                debug!("Header validated at line {}", line_no);
                continue;
            }
            debug!("Header enforcement off, line {} parsed as data", line_no);
        }

        let packet = parse_packet_row(&cells, line_no, options.reject_out_of_range)?;

        if options.enforce_sorted_timestamps {
            check_ordering(previous_ts, packet.packet_start_us, line_no)?;
        }

        result.packets.push(packet);
        result.row_count += 1;
        previous_ts = Some(packet.packet_start_us);
    }

    debug!(
        "Parsed {} rows from {}, skipped {} blank lines",
        result.row_count, source, result.skipped_rows
    );

    Ok(result)
}

/// Validate header cells against [`TRACE_COLUMNS`]
///
/// **Private** - internal helper for read_trace_from_reader
fn validate_header(cells: &[&str], line_no: usize) -> Result<(), TraceError> {
    if cells.len() != TRACE_FIELD_COUNT {
        return Err(TraceError::HeaderFieldCount {
            line: line_no,
            expected: TRACE_FIELD_COUNT,
            actual: cells.len(),
        });
    }

    for (column, (actual, expected)) in cells.iter().zip(TRACE_COLUMNS.iter()).enumerate() {
        if actual != expected {
            return Err(TraceError::HeaderField {
                line: line_no,
                column,
                expected: *expected,
                actual: actual.to_string(),
            });
        }
    }

    Ok(())
}

/// Convert one data row into a packet
///
/// **Private** - internal helper for read_trace_from_reader
fn parse_packet_row(
    cells: &[&str],
    line_no: usize,
    reject_out_of_range: bool,
) -> Result<Packet, TraceError> {
    let [start, wave, sender, index, size, class, priority] = cells else {
        return Err(TraceError::FieldCount {
            line: line_no,
            expected: TRACE_FIELD_COUNT,
            actual: cells.len(),
        });
    };

    Ok(Packet {
        packet_start_us: parse_signed(start, TRACE_COLUMNS[0], line_no)?,
        wave_id: parse_u32_field(wave, TRACE_COLUMNS[1], line_no, reject_out_of_range)?,
        sender_id: parse_u32_field(sender, TRACE_COLUMNS[2], line_no, reject_out_of_range)?,
        packet_index_for_sender: parse_u32_field(
            index,
            TRACE_COLUMNS[3],
            line_no,
            reject_out_of_range,
        )?,
        packet_size_bytes: parse_u32_field(size, TRACE_COLUMNS[4], line_no, reject_out_of_range)?,
        traffic_class: parse_traffic_class(class, line_no)?,
        priority_tag: parse_u8_field(priority, TRACE_COLUMNS[6], line_no, reject_out_of_range)?,
    })
}

/// Enforce non-decreasing `packet_start_us`
///
/// **Private** - the first accepted row has no predecessor and always passes
fn check_ordering(previous: Option<i64>, current: i64, line_no: usize) -> Result<(), TraceError> {
    match previous {
        Some(previous) if current < previous => Err(TraceError::TimestampRegression {
            line: line_no,
            previous,
            current,
        }),
        _ => Ok(()),
    }
}
