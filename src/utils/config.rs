//! Configuration and constants for the reader and CLI.

/// Default cell separator for trace files
pub const DEFAULT_DELIMITER: char = ',';

/// Current summary JSON schema version
pub const SUMMARY_SCHEMA_VERSION: &str = "1.0.0";

/// Characters that make a line blank when it contains nothing else
pub const BLANK_CHARS: &[char] = &[' ', '\t', '\r', '\n'];
