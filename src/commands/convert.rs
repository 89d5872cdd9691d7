//! Convert command implementation.
//!
//! Reads a trace with full validation and writes it back out, typically
//! with a different delimiter.

use super::models::ConvertArgs;
use crate::output::write_trace_csv;
use crate::parser::read_trace_csv;
use anyhow::{Context, Result};
use log::info;

/// Execute the convert command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// Number of packets written
pub fn execute_convert(args: &ConvertArgs) -> Result<usize> {
    let result = read_trace_csv(&args.input, &args.read_options)
        .with_context(|| format!("Failed to read trace {}", args.input.display()))?;

    write_trace_csv(&result.packets, &args.output, args.output_delimiter)
        .with_context(|| format!("Failed to write trace {}", args.output.display()))?;

    info!(
        "✓ Converted {} packets: {} -> {}",
        result.row_count,
        args.input.display(),
        args.output.display()
    );

    Ok(result.row_count)
}

/// Validate convert arguments
///
/// **Public** - can be called before execute_convert for early validation
pub fn validate_convert_args(args: &ConvertArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() || args.output.as_os_str().is_empty() {
        anyhow::bail!("Input and output paths cannot be empty");
    }

    if args.input == args.output {
        anyhow::bail!("Output path must differ from input path");
    }

    args.read_options.validate()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{read_trace_csv, TraceReadOptions};
    use std::path::PathBuf;

    #[test]
    fn test_execute_convert_changes_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.tsv");
        std::fs::write(
            &input,
            "packet_start_us,wave_id,sender_id,packet_index_for_sender,packet_size_bytes,traffic_class,priority_tag\n\
             \n\
             0,1,1,0,512,control,7\n\
             100,1,1,1,1500,bulk,0\n",
        )
        .unwrap();

        let args = ConvertArgs {
            input: input.clone(),
            output: output.clone(),
            output_delimiter: '\t',
            ..Default::default()
        };
        assert_eq!(execute_convert(&args).unwrap(), 2);

        let original = read_trace_csv(&input, &TraceReadOptions::default()).unwrap();
        let converted =
            read_trace_csv(&output, &TraceReadOptions::new().with_delimiter('\t')).unwrap();
        assert_eq!(converted.packets, original.packets);
        assert_eq!(converted.skipped_rows, 0);
    }

    #[test]
    fn test_validate_convert_args_same_path() {
        let args = ConvertArgs {
            input: PathBuf::from("trace.csv"),
            output: PathBuf::from("trace.csv"),
            ..Default::default()
        };
        assert!(validate_convert_args(&args).is_err());
        assert!(validate_convert_args(&ConvertArgs::default()).is_ok());
    }
}
