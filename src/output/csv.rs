//! Trace CSV writer.
//!
//! Emits packets in the exact format `read_trace_csv` accepts: the fixed
//! header followed by one row per packet, in the given order.

use crate::parser::schema::{Packet, TRACE_COLUMNS};
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write packets to a trace CSV file
///
/// **Public** - main entry point for trace export
///
/// # Errors
/// * `OutputError::InvalidDelimiter` - delimiter could appear inside a cell
/// * `OutputError::InvalidPath` - path is empty, a directory, or uncreatable
/// * `OutputError::WriteFailed` - I/O error during write
pub fn write_trace_csv(
    packets: &[Packet],
    output_path: impl AsRef<Path>,
    delimiter: char,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!(
        "Writing {} packets to: {}",
        packets.len(),
        output_path.display()
    );

    check_delimiter(delimiter)?;
    super::validate_path(output_path)?;
    super::create_parent_dirs(output_path)?;

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_rows(&mut writer, packets, delimiter)?;
    writer.flush()?;

    info!(
        "Trace written successfully ({} bytes)",
        super::calculate_file_size(output_path)
    );

    Ok(())
}

/// Render packets as trace CSV text
///
/// **Public** - useful for tests and in-memory pipelines
pub fn trace_to_string(packets: &[Packet], delimiter: char) -> Result<String, OutputError> {
    check_delimiter(delimiter)?;

    let mut buffer = Vec::new();
    write_rows(&mut buffer, packets, delimiter)?;

    // Every byte written comes from ASCII digits, literals and a `char`
    String::from_utf8(buffer).map_err(|e| {
        OutputError::WriteFailed(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

/// Build the conventional file name for a generated trace
///
/// `<scenario>_seed<seed>_senders<senders>_waves<waves>.csv` under
/// `output_dir`; a missing scenario is labelled `custom`.
pub fn build_trace_path(
    output_dir: impl AsRef<Path>,
    scenario: Option<&str>,
    seed: u64,
    senders_per_wave: u32,
    number_of_waves: u32,
) -> PathBuf {
    let label = scenario.unwrap_or("custom");
    output_dir.as_ref().join(format!(
        "{}_seed{}_senders{}_waves{}.csv",
        label, seed, senders_per_wave, number_of_waves
    ))
}

/// Reject delimiters that can occur inside a header name or a cell
///
/// **Private** - keeps written traces readable
fn check_delimiter(delimiter: char) -> Result<(), OutputError> {
    if delimiter.is_ascii_alphanumeric() || matches!(delimiter, '_' | '-' | '+' | '\n' | '\r') {
        return Err(OutputError::InvalidDelimiter(delimiter));
    }
    Ok(())
}

/// Write header and packet rows
///
/// **Private** - shared by file and string output
fn write_rows<W: Write>(
    writer: &mut W,
    packets: &[Packet],
    delimiter: char,
) -> std::io::Result<()> {
    let separator = delimiter.to_string();

    writeln!(writer, "{}", TRACE_COLUMNS.join(separator.as_str()))?;
    for packet in packets {
        writeln!(
            writer,
            "{ts}{d}{wave}{d}{sender}{d}{index}{d}{size}{d}{class}{d}{priority}",
            ts = packet.packet_start_us,
            wave = packet.wave_id,
            sender = packet.sender_id,
            index = packet.packet_index_for_sender,
            size = packet.packet_size_bytes,
            class = packet.traffic_class,
            priority = packet.priority_tag,
            d = delimiter,
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::TrafficClass;

    fn sample() -> Vec<Packet> {
        vec![
            Packet {
                packet_start_us: 0,
                wave_id: 1,
                sender_id: 1,
                packet_index_for_sender: 0,
                packet_size_bytes: 512,
                traffic_class: TrafficClass::Control,
                priority_tag: 7,
            },
            Packet {
                packet_start_us: 100,
                wave_id: 1,
                sender_id: 1,
                packet_index_for_sender: 1,
                packet_size_bytes: 1500,
                traffic_class: TrafficClass::Bulk,
                priority_tag: 0,
            },
        ]
    }

    #[test]
    fn test_trace_to_string() {
        let text = trace_to_string(&sample(), ',').unwrap();
        assert_eq!(
            text,
            "packet_start_us,wave_id,sender_id,packet_index_for_sender,packet_size_bytes,traffic_class,priority_tag\n\
             0,1,1,0,512,control,7\n\
             100,1,1,1,1500,bulk,0\n"
        );
    }

    #[test]
    fn test_trace_to_string_tab() {
        let text = trace_to_string(&sample(), '\t').unwrap();
        assert!(text.lines().nth(1).unwrap().starts_with("0\t1\t1\t0\t512\tcontrol\t7"));
    }

    #[test]
    fn test_rejects_ambiguous_delimiters() {
        for delimiter in ['1', 'a', '_', '-', '\n'] {
            assert!(matches!(
                trace_to_string(&sample(), delimiter),
                Err(OutputError::InvalidDelimiter(_))
            ));
        }
    }

    #[test]
    fn test_build_trace_path() {
        let path = build_trace_path("src/data/traces", Some("normal_traffic"), 7, 32, 100);
        assert_eq!(
            path,
            PathBuf::from("src/data/traces/normal_traffic_seed7_senders32_waves100.csv")
        );

        let path = build_trace_path("out", None, 1, 2, 3);
        assert_eq!(path, PathBuf::from("out/custom_seed1_senders2_waves3.csv"));
    }
}
