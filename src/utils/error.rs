//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Broad failure category of a [`TraceError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceErrorKind {
    /// Source could not be opened or read
    Io,
    /// Read options are unusable
    Options,
    /// Header column count or name mismatch
    HeaderSchema,
    /// Data row has the wrong number of cells
    RowShape,
    /// A cell could not be converted to its field type
    FieldParse,
    /// Timestamp went backwards
    Ordering,
}

/// Why an integer cell was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerFault {
    /// No numeric text at the start of the cell
    Malformed,
    /// Numeric prefix followed by unconsumed characters
    TrailingCharacters,
    /// Value does not fit the target width
    OutOfRange,
}

impl fmt::Display for IntegerFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IntegerFault::Malformed => "Invalid integer",
            IntegerFault::TrailingCharacters => "Invalid integer suffix",
            IntegerFault::OutOfRange => "Integer out of range",
        };
        f.write_str(text)
    }
}

/// Errors that can occur while reading a trace CSV
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Failed to open trace CSV: {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read trace CSV {path} at line {line}: {source}")]
    Read {
        path: String,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid read options: {0}")]
    InvalidOptions(String),

    #[error("Invalid header field count at line {line}. Expected {expected}, got {actual}")]
    HeaderFieldCount {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid header field at line {line}, column {column}. Expected '{expected}', got '{actual}'")]
    HeaderField {
        line: usize,
        column: usize,
        expected: &'static str,
        actual: String,
    },

    #[error("Invalid field count at line {line}. Expected {expected}, got {actual}")]
    FieldCount {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{fault} in field '{field}' at line {line}: '{value}'")]
    InvalidInteger {
        field: &'static str,
        line: usize,
        value: String,
        fault: IntegerFault,
    },

    #[error("Invalid traffic_class at line {line}: '{value}' (expected 'bulk' or 'control')")]
    InvalidTrafficClass { line: usize, value: String },

    #[error("packet_start_us is not non-decreasing at line {line}. Previous={previous}, current={current}")]
    TimestampRegression {
        line: usize,
        previous: i64,
        current: i64,
    },
}

impl TraceError {
    /// Failure category, for branching without inspecting the message
    pub fn kind(&self) -> TraceErrorKind {
        match self {
            TraceError::Open { .. } | TraceError::Read { .. } => TraceErrorKind::Io,
            TraceError::InvalidOptions(_) => TraceErrorKind::Options,
            TraceError::HeaderFieldCount { .. } | TraceError::HeaderField { .. } => {
                TraceErrorKind::HeaderSchema
            }
            TraceError::FieldCount { .. } => TraceErrorKind::RowShape,
            TraceError::InvalidInteger { .. } | TraceError::InvalidTrafficClass { .. } => {
                TraceErrorKind::FieldParse
            }
            TraceError::TimestampRegression { .. } => TraceErrorKind::Ordering,
        }
    }

    /// 1-indexed line the failure was detected on, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            TraceError::Open { .. } | TraceError::InvalidOptions(_) => None,
            TraceError::Read { line, .. }
            | TraceError::HeaderFieldCount { line, .. }
            | TraceError::HeaderField { line, .. }
            | TraceError::FieldCount { line, .. }
            | TraceError::InvalidInteger { line, .. }
            | TraceError::InvalidTrafficClass { line, .. }
            | TraceError::TimestampRegression { line, .. } => Some(*line),
        }
    }
}

/// Failed sanity checks over an already-loaded trace
#[derive(Error, Debug, PartialEq)]
pub enum CheckError {
    #[error("Trace contains no packets")]
    EmptyTrace,

    #[error("tolerance must be finite and >= 0, got {0}")]
    InvalidTolerance(f64),

    #[error("expected ratio must be within [0, 1], got {0}")]
    InvalidExpectedRatio(f64),

    #[error("Control ratio out of bounds. expected={expected:.6}, actual={actual:.6}, tolerance={tolerance:.6}")]
    ControlRatio {
        expected: f64,
        actual: f64,
        tolerance: f64,
    },

    #[error("Wave mismatch. missing_waves={missing:?}, extra_waves={extra:?}")]
    WaveMismatch { missing: Vec<u32>, extra: Vec<u32> },

    #[error("Sender coverage mismatch for wave {wave}. missing_senders={missing:?}, extra_senders={extra:?}")]
    SenderCoverage {
        wave: u32,
        missing: Vec<u32>,
        extra: Vec<u32>,
    },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Delimiter {0:?} would make the trace unreadable")]
    InvalidDelimiter(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_line() {
        let err = TraceError::TimestampRegression {
            line: 4,
            previous: 50,
            current: 30,
        };
        assert_eq!(err.kind(), TraceErrorKind::Ordering);
        assert_eq!(err.line(), Some(4));

        let err = TraceError::InvalidOptions("bad".to_string());
        assert_eq!(err.kind(), TraceErrorKind::Options);
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_integer_message() {
        let err = TraceError::InvalidInteger {
            field: "wave_id",
            line: 3,
            value: "12abc".to_string(),
            fault: IntegerFault::TrailingCharacters,
        };
        assert_eq!(
            err.to_string(),
            "Invalid integer suffix in field 'wave_id' at line 3: '12abc'"
        );
    }
}
