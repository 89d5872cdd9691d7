use crate::parser::schema::TRACE_COLUMNS;
use crate::utils::config::{DEFAULT_DELIMITER, SUMMARY_SCHEMA_VERSION};

/// Display trace schema information
pub fn display_schema(show_details: bool) {
    println!("CPU FIFO Trace Schema");
    println!("Summary Version: {}", SUMMARY_SCHEMA_VERSION);
    println!();
    println!("Header:");
    println!("  {}", TRACE_COLUMNS.join(DEFAULT_DELIMITER.to_string().as_str()));

    if show_details {
        println!();
        println!("Columns:");
        println!("  packet_start_us: i64         - Arrival time in microseconds, non-decreasing");
        println!("  wave_id: u32                 - Incast wave");
        println!("  sender_id: u32               - Sender within the wave");
        println!("  packet_index_for_sender: u32 - Per-sender sequence index");
        println!("  packet_size_bytes: u32       - Packet size");
        println!("  traffic_class: text          - 'bulk' or 'control'");
        println!("  priority_tag: u8             - Priority marking");
        println!();
        println!("Blank lines are skipped anywhere in the file.");
    } else {
        println!("Use --show for column details");
    }
}

/// Display version information
pub fn display_version() {
    println!("CPU FIFO Trace v{}", env!("CARGO_PKG_VERSION"));
    println!("Summary Schema: v{}", SUMMARY_SCHEMA_VERSION);
    println!();
    println!("Strict trace ingestion for the CPU FIFO queue simulator.");
}
