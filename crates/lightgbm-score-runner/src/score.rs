//! One scoring run: resolve, build, invoke

use crate::command::{build_command, CommandLine};
use crate::config::Config;
use crate::metrics::MetricsSink;
use crate::process::ProcessRunner;
use crate::resolve::{resolve_args, RawArgs};
use lightgbm_score_types::{InvocationArgs, InvocationResult, Result};

/// Everything produced by a scoring run
#[derive(Debug, Clone)]
pub struct ScoreRun {
    pub args: InvocationArgs,
    pub command: CommandLine,
    pub result: InvocationResult,
}

/// Validate `raw`, build the LightGBM prediction command and run it.
///
/// Configuration errors are returned before anything is spawned.
pub fn score(raw: RawArgs, config: &Config, sink: &dyn MetricsSink) -> Result<ScoreRun> {
    score_with(raw, config, sink, |_| Ok(()))
}

/// Like [`score`], handing the result to `report` while the invocation is
/// still being timed.
pub fn score_with<F>(raw: RawArgs, config: &Config, sink: &dyn MetricsSink, report: F) -> Result<ScoreRun>
where
    F: FnOnce(&InvocationResult) -> Result<()>,
{
    let args = resolve_args(raw, config)?;
    let command = build_command(&args, config.verbosity);
    let result = ProcessRunner::new(sink).run_with(&command, report)?;

    Ok(ScoreRun {
        args,
        command,
        result,
    })
}

/// Exit status for this process after a completed run
pub fn exit_status(result: &InvocationResult, propagate: bool) -> i32 {
    if !propagate {
        return 0;
    }
    result.exit_code.unwrap_or(1)
}
