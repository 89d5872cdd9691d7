use cpu_fifo_trace::aggregator::{
    check_control_ratio, find_timestamp_regression, summarize_packets, summarize_trace,
};
use cpu_fifo_trace::parser::{read_trace_csv, TraceReadOptions};
use std::io::Write;
use tempfile::NamedTempFile;

fn generated_trace() -> NamedTempFile {
    // Two waves of two senders, every fourth packet is control
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "packet_start_us,wave_id,sender_id,packet_index_for_sender,packet_size_bytes,traffic_class,priority_tag"
    )
    .unwrap();
    let mut n = 0;
    for wave in 0..2u32 {
        for sender in 0..2u32 {
            for index in 0..2u32 {
                let class = if n % 4 == 0 { "control,46" } else { "bulk,0" };
                let ts = i64::from(wave) * 5_000 + i64::from(sender) * 10 + i64::from(index);
                writeln!(file, "{},{},{},{},1500,{}", ts, wave, sender, index, class).unwrap();
                n += 1;
            }
        }
    }
    file.flush().unwrap();
    file
}

#[test]
fn test_summary_of_generated_trace() {
    let file = generated_trace();
    let result = read_trace_csv(file.path(), &TraceReadOptions::default()).unwrap();
    let summary = summarize_trace("generated.csv", &result);

    assert_eq!(summary.packet_count, 8);
    assert_eq!(summary.total_bytes, 8 * 1500);
    assert_eq!(summary.control.packets, 2);
    assert_eq!(summary.bulk.packets, 6);
    assert_eq!(summary.wave_count, 2);
    assert_eq!(summary.sender_count, 2);
    assert_eq!(summary.first_start_us, Some(0));
    assert_eq!(summary.last_start_us, Some(5_011));
    assert!(check_control_ratio(&summary, 0.25, 0.0).is_ok());
    assert!(check_control_ratio(&summary, 0.05, 0.01).is_err());
}

#[test]
fn test_sorted_read_has_no_regression() {
    let file = generated_trace();
    let result = read_trace_csv(file.path(), &TraceReadOptions::default()).unwrap();
    assert_eq!(find_timestamp_regression(&result.packets), None);
}

#[test]
fn test_unsorted_read_regression_is_found() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "0,1,1,0,512,bulk,0\n50,1,1,1,512,bulk,0\n30,1,1,2,512,bulk,0\n").unwrap();
    file.flush().unwrap();

    let options = TraceReadOptions::new()
        .with_header(false)
        .with_sorted_timestamps(false);
    let result = read_trace_csv(file.path(), &options).unwrap();

    let regression = find_timestamp_regression(&result.packets).unwrap();
    assert_eq!(regression.index, 2);
    assert_eq!(regression.previous, 50);
    assert_eq!(regression.current, 30);

    // Summary sees the same packets, untouched
    let summary = summarize_packets(&result.packets);
    assert_eq!(summary.packet_count, 3);
    assert_eq!(summary.span_us(), 50);
}
