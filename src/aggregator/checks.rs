//! Sanity checks over a loaded trace.
//!
//! These run after a read, on the caller's request. They never alter the
//! packet sequence.

use super::summary::TraceSummary;
use crate::parser::schema::Packet;
use crate::utils::error::CheckError;
use std::collections::{BTreeMap, BTreeSet};

/// A timestamp that went backwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampRegression {
    /// Position of the offending packet in the sequence
    pub index: usize,
    pub previous: i64,
    pub current: i64,
}

/// Find the first packet whose timestamp is below its predecessor's
///
/// Useful after an unsorted read, to report what ordering enforcement
/// would have rejected.
pub fn find_timestamp_regression(packets: &[Packet]) -> Option<TimestampRegression> {
    packets
        .windows(2)
        .enumerate()
        .find(|(_, pair)| pair[1].packet_start_us < pair[0].packet_start_us)
        .map(|(i, pair)| TimestampRegression {
            index: i + 1,
            previous: pair[0].packet_start_us,
            current: pair[1].packet_start_us,
        })
}

/// Check the share of `control` packets against an expected ratio
pub fn check_control_ratio(
    summary: &TraceSummary,
    expected: f64,
    tolerance: f64,
) -> Result<(), CheckError> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(CheckError::InvalidTolerance(tolerance));
    }
    if !(0.0..=1.0).contains(&expected) {
        return Err(CheckError::InvalidExpectedRatio(expected));
    }
    if summary.packet_count == 0 {
        return Err(CheckError::EmptyTrace);
    }

    let actual = summary.control_ratio();
    if (actual - expected).abs() > tolerance {
        return Err(CheckError::ControlRatio {
            expected,
            actual,
            tolerance,
        });
    }

    Ok(())
}

/// Check that every wave in `0..number_of_waves` holds every sender in
/// `0..senders_per_wave`
///
/// Waves are compared first; sender sets are then compared wave by wave in
/// ascending order, reporting the first mismatch.
pub fn check_wave_sender_coverage(
    packets: &[Packet],
    number_of_waves: u32,
    senders_per_wave: u32,
) -> Result<(), CheckError> {
    let mut senders_by_wave: BTreeMap<u32, BTreeSet<u32>> = BTreeMap::new();
    for packet in packets {
        senders_by_wave
            .entry(packet.wave_id)
            .or_default()
            .insert(packet.sender_id);
    }

    let expected_waves: BTreeSet<u32> = (0..number_of_waves).collect();
    let actual_waves: BTreeSet<u32> = senders_by_wave.keys().copied().collect();
    if actual_waves != expected_waves {
        return Err(CheckError::WaveMismatch {
            missing: expected_waves.difference(&actual_waves).copied().collect(),
            extra: actual_waves.difference(&expected_waves).copied().collect(),
        });
    }

    let expected_senders: BTreeSet<u32> = (0..senders_per_wave).collect();
    for (&wave, actual_senders) in &senders_by_wave {
        if *actual_senders != expected_senders {
            return Err(CheckError::SenderCoverage {
                wave,
                missing: expected_senders.difference(actual_senders).copied().collect(),
                extra: actual_senders.difference(&expected_senders).copied().collect(),
            });
        }
    }

    Ok(())
}
