//! Synchronous, timed execution of the LightGBM CLI

use crate::command::CommandLine;
use crate::metrics::{LogTimeBlock, MetricsSink};
use chrono::Utc;
use lightgbm_score_types::{Error, InvocationResult, MetricTags, Result};
use std::process::Command;
use tracing::{info, warn};

/// Metric name recorded around the subprocess call
pub const INFERENCING_METRIC: &str = "inferencing";

/// Tags identifying a LightGBM CLI scoring run
pub fn score_tags() -> MetricTags {
    MetricTags::new()
        .with("framework", "lightgbm_cli")
        .with("task", "score")
}

/// Runs a command to completion, timing it into `sink`.
///
/// There is no timeout: a hung child blocks the caller indefinitely.
pub struct ProcessRunner<'a> {
    sink: &'a dyn MetricsSink,
    tags: MetricTags,
}

impl<'a> ProcessRunner<'a> {
    pub fn new(sink: &'a dyn MetricsSink) -> Self {
        Self {
            sink,
            tags: score_tags(),
        }
    }

    /// Execute `command`, capturing stdout, stderr and exit code.
    ///
    /// A non-zero exit is reported in the result, not as an error. Only a
    /// failure to start the process is an error.
    pub fn run(&self, command: &CommandLine) -> Result<InvocationResult> {
        self.run_with(command, |_| Ok(()))
    }

    /// Like [`ProcessRunner::run`], calling `report` with the result before
    /// the timing block closes.
    pub fn run_with<F>(&self, command: &CommandLine, report: F) -> Result<InvocationResult>
    where
        F: FnOnce(&InvocationResult) -> Result<()>,
    {
        info!(command = %command, "Running .predict()");

        let started_at = Utc::now();
        let timer = LogTimeBlock::new(self.sink, INFERENCING_METRIC, self.tags.clone());
        let output = Command::new(&command.program)
            .args(&command.args)
            .output()
            .map_err(|source| Error::Spawn {
                program: command.program.display().to_string(),
                source,
            })?;

        let result = InvocationResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
            elapsed_secs: timer.elapsed().as_secs_f64(),
            started_at,
        };

        if !result.success() {
            warn!(
                "{}",
                Error::ExternalToolFailure {
                    code: result.exit_code
                }
            );
        }

        report(&result)?;
        drop(timer);
        Ok(result)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::metrics::MemorySink;
    use crate::testing::write_stub;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn command(program: PathBuf) -> CommandLine {
        CommandLine {
            program,
            args: vec!["task=prediction".to_string(), "verbosity=2".to_string()],
        }
    }

    #[test]
    fn test_captures_stdout_and_stderr() {
        let dir = tempdir().unwrap();
        let stub = write_stub(dir.path(), "echo A\necho B >&2\nexit 0\n");
        let sink = MemorySink::new();

        let result = ProcessRunner::new(&sink).run(&command(stub)).unwrap();
        assert_eq!(result.stdout, "A\n");
        assert_eq!(result.stderr, "B\n");
        assert_eq!(result.exit_code, Some(0));
    }

    #[test]
    fn test_non_zero_exit_is_not_an_error() {
        let dir = tempdir().unwrap();
        let stub = write_stub(dir.path(), "exit 7\n");
        let sink = MemorySink::new();

        let result = ProcessRunner::new(&sink).run(&command(stub)).unwrap();
        assert_eq!(result.exit_code, Some(7));
        assert!(!result.success());
    }

    #[test]
    fn test_arguments_are_passed_through() {
        let dir = tempdir().unwrap();
        let stub = write_stub(dir.path(), "for arg in \"$@\"; do echo \"$arg\"; done\n");
        let sink = MemorySink::new();

        let result = ProcessRunner::new(&sink).run(&command(stub)).unwrap();
        assert_eq!(result.stdout, "task=prediction\nverbosity=2\n");
    }

    #[test]
    fn test_timing_is_recorded_with_tags() {
        let dir = tempdir().unwrap();
        let stub = write_stub(dir.path(), "exit 0\n");
        let sink = MemorySink::new();

        ProcessRunner::new(&sink).run(&command(stub)).unwrap();
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "inferencing");
        assert_eq!(records[0].tags.get("framework"), Some("lightgbm_cli"));
        assert_eq!(records[0].tags.get("task"), Some("score"));
    }

    #[test]
    fn test_timing_is_recorded_when_spawn_fails() {
        let dir = tempdir().unwrap();
        // exists but is not executable
        let not_executable = dir.path().join("lightgbm");
        std::fs::write(&not_executable, "").unwrap();
        let sink = MemorySink::new();

        let err = ProcessRunner::new(&sink)
            .run(&command(not_executable))
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
        assert_eq!(sink.entered(), vec!["inferencing"]);
        assert_eq!(sink.records().len(), 1);
    }

    #[test]
    fn test_report_runs_before_timing_is_recorded() {
        let dir = tempdir().unwrap();
        let stub = write_stub(dir.path(), "echo A\n");
        let sink = MemorySink::new();
        let mut records_seen_by_report = None;

        let result = ProcessRunner::new(&sink)
            .run_with(&command(stub), |result| {
                assert_eq!(result.stdout, "A\n");
                records_seen_by_report = Some(sink.records().len());
                Ok(())
            })
            .unwrap();

        assert_eq!(records_seen_by_report, Some(0));
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert!(records[0].elapsed.as_secs_f64() >= result.elapsed_secs);
    }

    #[test]
    fn test_report_error_still_records_timing() {
        let dir = tempdir().unwrap();
        let stub = write_stub(dir.path(), "exit 0\n");
        let sink = MemorySink::new();

        let err = ProcessRunner::new(&sink)
            .run_with(&command(stub), |_| {
                Err(Error::Io(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed")))
            })
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(sink.records().len(), 1);
    }
}
