//! Command handler

use crate::cli::Cli;
use crate::output::output_result;
use lightgbm_score_runner::{
    exit_status, score_with, time_call, Config, MetricsSink, MultiSink, PrintSink, RawArgs,
    ScoreRun, TracingSink,
};
use lightgbm_score_types::{ConfigError, OutputFormat, Result, TimingOutput};
use tracing::debug;

/// Execute CLI command, returning the exit status for this process
pub fn execute(cli: Cli) -> Result<i32> {
    // Load config
    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Override from CLI args
    if let Some(format) = cli.format {
        config.output_format = format;
    }
    if cli.fail_on_error {
        config.propagate_exit_code = true;
    }

    if cli.show_config {
        print!("{}", config);
        return Ok(0);
    }

    debug!(?config, "effective configuration");

    let sink = timing_sink(config.timing, config.output_format);
    let run = run_score(raw_args(cli)?, &config, sink.as_ref())?;
    Ok(exit_status(&run.result, config.propagate_exit_code))
}

/// Score and print the result while the invocation is still being timed
pub fn run_score(raw: RawArgs, config: &Config, sink: &dyn MetricsSink) -> Result<ScoreRun> {
    let format = config.output_format;
    let run = time_call(sink, "score", || {
        score_with(raw, config, sink, |result| output_result(format, result))
    })?;

    if let Some(ref path) = run.args.output_path {
        debug!(path = %path.display(), "predictions file");
    }
    Ok(run)
}

fn raw_args(cli: Cli) -> Result<RawArgs> {
    let data = cli.data.ok_or(ConfigError::MissingData)?;
    Ok(RawArgs {
        lightgbm_exec: cli.lightgbm_exec,
        data,
        model: cli.model,
        output: cli.output,
        unknown: cli.unknown,
    })
}

/// Sink for the configured timing output.
///
/// Printed timing lines would corrupt JSON on stdout, so JSON output
/// logs them instead.
fn timing_sink(timing: TimingOutput, format: OutputFormat) -> Box<dyn MetricsSink> {
    let timing = match (timing, format) {
        (TimingOutput::Print, OutputFormat::Json) => TimingOutput::Log,
        (TimingOutput::Both, OutputFormat::Json) => TimingOutput::Log,
        (timing, _) => timing,
    };

    match timing {
        TimingOutput::Print => Box::new(PrintSink),
        TimingOutput::Log => Box::new(TracingSink),
        TimingOutput::Both => Box::new(MultiSink::new().with(PrintSink).with(TracingSink)),
    }
}
