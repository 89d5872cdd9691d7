//! Line tokenization and cell conversion.
//!
//! Cells are taken verbatim: no trimming, quoting or escaping. Every
//! conversion either yields a typed value or a [`TraceError`] naming the
//! field, line and raw text.

use super::schema::TrafficClass;
use crate::utils::config::BLANK_CHARS;
use crate::utils::error::{IntegerFault, TraceError};
use log::warn;

/// Check whether a line holds only spaces, tabs and line terminators
pub fn is_blank_line(line: &str) -> bool {
    line.chars().all(|ch| BLANK_CHARS.contains(&ch))
}

/// Split a line into raw cells on `delimiter`
///
/// `"a,,b"` yields three cells and `"a,b,"` yields a trailing empty cell.
pub fn split_line(line: &str, delimiter: char) -> Vec<&str> {
    line.split(delimiter).collect()
}

/// Length of the leading `[sign]digits` run, or 0 if there are no digits
fn numeric_prefix_len(value: &str, allow_sign: bool) -> usize {
    let bytes = value.as_bytes();
    let sign = usize::from(allow_sign && matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = bytes[sign..].iter().take_while(|b| b.is_ascii_digit()).count();

    if digits == 0 {
        0
    } else {
        sign + digits
    }
}

fn integer_error(
    value: &str,
    field: &'static str,
    line: usize,
    fault: IntegerFault,
) -> TraceError {
    TraceError::InvalidInteger {
        field,
        line,
        value: value.to_string(),
        fault,
    }
}

/// Check the cell shape before handing it to `str::parse`
fn check_integer_shape(
    value: &str,
    field: &'static str,
    line: usize,
    allow_sign: bool,
) -> Result<(), TraceError> {
    match numeric_prefix_len(value, allow_sign) {
        0 => Err(integer_error(value, field, line, IntegerFault::Malformed)),
        len if len < value.len() => Err(integer_error(
            value,
            field,
            line,
            IntegerFault::TrailingCharacters,
        )),
        _ => Ok(()),
    }
}

/// Parse a signed base-10 cell
///
/// An optional leading `+` or `-` is accepted.
pub fn parse_signed(value: &str, field: &'static str, line: usize) -> Result<i64, TraceError> {
    check_integer_shape(value, field, line, true)?;
    value
        .parse::<i64>()
        .map_err(|_| integer_error(value, field, line, IntegerFault::OutOfRange))
}

/// Parse an unsigned base-10 cell
///
/// Only ASCII digits are accepted; a sign of either kind is rejected.
pub fn parse_unsigned(value: &str, field: &'static str, line: usize) -> Result<u64, TraceError> {
    check_integer_shape(value, field, line, false)?;
    value
        .parse::<u64>()
        .map_err(|_| integer_error(value, field, line, IntegerFault::OutOfRange))
}

/// Narrow a 64-bit parse to a smaller field
///
/// Without `reject_out_of_range` overflow is truncated to the low bits.
fn narrow<T: TryFrom<u64>>(
    parsed: u64,
    value: &str,
    field: &'static str,
    line: usize,
    reject_out_of_range: bool,
    truncate: impl FnOnce(u64) -> T,
) -> Result<T, TraceError> {
    match T::try_from(parsed) {
        Ok(narrowed) => Ok(narrowed),
        Err(_) if reject_out_of_range => {
            Err(integer_error(value, field, line, IntegerFault::OutOfRange))
        }
        Err(_) => {
            warn!(
                "Field '{}' at line {} overflows its width, truncating '{}'",
                field, line, value
            );
            Ok(truncate(parsed))
        }
    }
}

/// Parse an unsigned cell into a 32-bit field
pub fn parse_u32_field(
    value: &str,
    field: &'static str,
    line: usize,
    reject_out_of_range: bool,
) -> Result<u32, TraceError> {
    let parsed = parse_unsigned(value, field, line)?;
    narrow(parsed, value, field, line, reject_out_of_range, |v| v as u32)
}

/// Parse an unsigned cell into an 8-bit field
pub fn parse_u8_field(
    value: &str,
    field: &'static str,
    line: usize,
    reject_out_of_range: bool,
) -> Result<u8, TraceError> {
    let parsed = parse_unsigned(value, field, line)?;
    narrow(parsed, value, field, line, reject_out_of_range, |v| v as u8)
}

/// Parse a `traffic_class` cell
pub fn parse_traffic_class(value: &str, line: usize) -> Result<TrafficClass, TraceError> {
    value
        .parse::<TrafficClass>()
        .map_err(|_| TraceError::InvalidTrafficClass {
            line,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::TraceErrorKind;

    fn fault_of(err: TraceError) -> IntegerFault {
        match err {
            TraceError::InvalidInteger { fault, .. } => fault,
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_blank_lines() {
        assert!(is_blank_line(""));
        assert!(is_blank_line("   "));
        assert!(is_blank_line("\t \r"));
        assert!(!is_blank_line(" x "));
        assert!(!is_blank_line(","));
    }

    #[test]
    fn test_split_is_verbatim() {
        assert_eq!(split_line("a, b,c", ','), vec!["a", " b", "c"]);
        assert_eq!(split_line("a,,b", ','), vec!["a", "", "b"]);
        assert_eq!(split_line("a,b,", ','), vec!["a", "b", ""]);
        assert_eq!(split_line("a;b", ';'), vec!["a", "b"]);
        assert_eq!(split_line("a;b", ','), vec!["a;b"]);
    }

    #[test]
    fn test_parse_signed() {
        assert_eq!(parse_signed("0", "packet_start_us", 1).unwrap(), 0);
        assert_eq!(parse_signed("-250", "packet_start_us", 1).unwrap(), -250);
        assert_eq!(parse_signed("+17", "packet_start_us", 1).unwrap(), 17);
        assert_eq!(
            parse_signed("9223372036854775807", "packet_start_us", 1).unwrap(),
            i64::MAX
        );
    }

    #[test]
    fn test_parse_signed_faults() {
        let fault = |v| fault_of(parse_signed(v, "packet_start_us", 2).unwrap_err());
        assert_eq!(fault(""), IntegerFault::Malformed);
        assert_eq!(fault("-"), IntegerFault::Malformed);
        assert_eq!(fault(" 5"), IntegerFault::Malformed);
        assert_eq!(fault("abc"), IntegerFault::Malformed);
        assert_eq!(fault("12abc"), IntegerFault::TrailingCharacters);
        assert_eq!(fault("1.5"), IntegerFault::TrailingCharacters);
        assert_eq!(fault("5 "), IntegerFault::TrailingCharacters);
        assert_eq!(fault("9223372036854775808"), IntegerFault::OutOfRange);
    }

    #[test]
    fn test_parse_unsigned_rejects_signs() {
        let fault = |v| fault_of(parse_unsigned(v, "wave_id", 3).unwrap_err());
        assert_eq!(fault("-1"), IntegerFault::Malformed);
        assert_eq!(fault("+1"), IntegerFault::Malformed);
        assert_eq!(fault("18446744073709551616"), IntegerFault::OutOfRange);
        assert_eq!(parse_unsigned("42", "wave_id", 3).unwrap(), 42);
    }

    #[test]
    fn test_narrowing_truncates_by_default() {
        assert_eq!(parse_u8_field("300", "priority_tag", 4, false).unwrap(), 44);
        assert_eq!(parse_u8_field("255", "priority_tag", 4, false).unwrap(), 255);
        assert_eq!(
            parse_u32_field("4294967297", "sender_id", 4, false).unwrap(),
            1
        );
    }

    #[test]
    fn test_narrowing_can_reject() {
        let err = parse_u8_field("300", "priority_tag", 5, true).unwrap_err();
        assert_eq!(err.kind(), TraceErrorKind::FieldParse);
        assert_eq!(err.line(), Some(5));
        assert_eq!(fault_of(err), IntegerFault::OutOfRange);

        assert_eq!(parse_u8_field("46", "priority_tag", 5, true).unwrap(), 46);
    }

    #[test]
    fn test_parse_traffic_class_error() {
        let err = parse_traffic_class("BULK", 9).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid traffic_class at line 9: 'BULK' (expected 'bulk' or 'control')"
        );
    }
}
