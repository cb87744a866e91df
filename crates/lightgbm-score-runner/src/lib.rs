//! Invocation of the LightGBM CLI for batch prediction
//!
//! Validates the executable and inputs, assembles the `task=prediction`
//! command line and runs it synchronously under a timing block.

pub mod command;
pub mod config;
pub mod io;
pub mod metrics;
pub mod process;
pub mod resolve;
pub mod score;

#[cfg(all(test, unix))]
mod testing;

pub use command::{build_command, CommandLine};
pub use config::Config;
pub use io::input_file_path;
pub use metrics::{
    time_call, LogTimeBlock, MemorySink, MetricsSink, MultiSink, PrintSink, TimingRecord, TracingSink,
};
pub use process::{score_tags, ProcessRunner, INFERENCING_METRIC};
pub use resolve::{resolve_args, RawArgs};
pub use score::{exit_status, score, score_with, ScoreRun};
