use crate::parser::trace_csv::TraceReadOptions;
use crate::utils::config::DEFAULT_DELIMITER;
use std::path::PathBuf;

/// Default tolerance for the control-ratio check
pub const DEFAULT_RATIO_TOLERANCE: f64 = 0.01;

/// Arguments for the inspect command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct InspectArgs {
    /// Trace CSV to load
    pub trace_path: PathBuf,

    /// Header, ordering, delimiter and range policy
    pub read_options: TraceReadOptions,

    /// Output path for JSON summary (optional)
    pub output_json: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Expected share of control packets (optional check)
    pub expected_control_ratio: Option<f64>,

    /// Allowed deviation from `expected_control_ratio`
    pub ratio_tolerance: f64,

    /// Number of waves the trace must cover, checked with `expected_senders`
    pub expected_waves: Option<u32>,

    /// Number of senders every wave must cover
    pub expected_senders: Option<u32>,
}

impl Default for InspectArgs {
    fn default() -> Self {
        Self {
            trace_path: PathBuf::from("trace.csv"),
            read_options: TraceReadOptions::default(),
            output_json: None,
            print_summary: true,
            expected_control_ratio: None,
            ratio_tolerance: DEFAULT_RATIO_TOLERANCE,
            expected_waves: None,
            expected_senders: None,
        }
    }
}

/// Arguments for the convert command
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Trace CSV to load
    pub input: PathBuf,

    /// Trace CSV to write
    pub output: PathBuf,

    /// Options used when reading `input`
    pub read_options: TraceReadOptions,

    /// Cell separator for `output`
    pub output_delimiter: char,
}

impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("trace.csv"),
            output: PathBuf::from("trace.out.csv"),
            read_options: TraceReadOptions::default(),
            output_delimiter: DEFAULT_DELIMITER,
        }
    }
}
