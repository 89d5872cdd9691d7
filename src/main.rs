//! CPU FIFO Trace CLI
//!
//! Validates, summarizes and converts packet arrival traces for the
//! CPU FIFO queue simulator.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use cpu_fifo_trace::commands::models::DEFAULT_RATIO_TOLERANCE;
use cpu_fifo_trace::commands::{
    display_schema, display_version, execute_convert, execute_inspect, validate_convert_args,
    validate_inspect_args, ConvertArgs, InspectArgs,
};
use cpu_fifo_trace::parser::TraceReadOptions;
use cpu_fifo_trace::utils::config::DEFAULT_DELIMITER;

/// CPU FIFO Trace - strict trace ingestion for the queue simulator
#[derive(Parser, Debug)]
#[command(name = "fifo-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Flags shared by every command that reads a trace
#[derive(Args, Debug)]
struct ReadFlags {
    /// Treat the first non-blank line as data instead of a header
    #[arg(long)]
    no_header: bool,

    /// Accept timestamps that go backwards
    #[arg(long)]
    unsorted: bool,

    /// Cell separator of the input trace
    #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
    delimiter: char,

    /// Fail on values that overflow their field instead of truncating
    #[arg(long)]
    strict_range: bool,
}

impl ReadFlags {
    fn to_options(&self) -> TraceReadOptions {
        TraceReadOptions::new()
            .with_header(!self.no_header)
            .with_sorted_timestamps(!self.unsorted)
            .with_delimiter(self.delimiter)
            .with_reject_out_of_range(self.strict_range)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a trace and print its summary
    Inspect {
        /// Trace CSV file
        #[arg(short, long)]
        file: PathBuf,

        #[command(flatten)]
        read: ReadFlags,

        /// Output path for JSON summary (optional)
        #[arg(long)]
        json: Option<PathBuf>,

        /// Do not print the text summary
        #[arg(short, long)]
        quiet: bool,

        /// Expected share of control packets, e.g. 0.05
        #[arg(long)]
        control_ratio: Option<f64>,

        /// Allowed deviation for --control-ratio
        #[arg(long, default_value_t = DEFAULT_RATIO_TOLERANCE)]
        tolerance: f64,

        /// Number of waves the trace must contain (ids 0..N)
        #[arg(long, requires = "senders")]
        waves: Option<u32>,

        /// Number of senders every wave must contain (ids 0..N)
        #[arg(long, requires = "waves")]
        senders: Option<u32>,
    },

    /// Validate a trace and rewrite it
    Convert {
        /// Trace CSV to read
        #[arg(short, long)]
        input: PathBuf,

        /// Trace CSV to write
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        read: ReadFlags,

        /// Cell separator of the written trace
        #[arg(long, default_value_t = DEFAULT_DELIMITER)]
        output_delimiter: char,
    },

    /// Display trace schema information
    Schema {
        /// Show column details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Inspect {
            file,
            read,
            json,
            quiet,
            control_ratio,
            tolerance,
            waves,
            senders,
        } => {
            let args = InspectArgs {
                trace_path: file,
                read_options: read.to_options(),
                output_json: json,
                print_summary: !quiet,
                expected_control_ratio: control_ratio,
                ratio_tolerance: tolerance,
                expected_waves: waves,
                expected_senders: senders,
            };

            validate_inspect_args(&args)?;
            execute_inspect(&args)?;
        }

        Commands::Convert {
            input,
            output,
            read,
            output_delimiter,
        } => {
            let args = ConvertArgs {
                input,
                output,
                read_options: read.to_options(),
                output_delimiter,
            };

            validate_convert_args(&args)?;
            execute_convert(&args)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
