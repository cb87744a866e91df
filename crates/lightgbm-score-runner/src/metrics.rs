//! Wall-clock timing of code blocks, reported to a caller-supplied sink

use lightgbm_score_types::MetricTags;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::info;

/// Metric names are capped at this many characters before the `.time` suffix
const MAX_METRIC_NAME_LEN: usize = 45;

/// One finished timing measurement
#[derive(Debug, Clone, PartialEq)]
pub struct TimingRecord {
    pub name: String,
    pub elapsed: Duration,
    pub tags: MetricTags,
}

/// Destination for timing records
pub trait MetricsSink {
    /// Called when a timed block starts
    fn enter(&self, _name: &str, _tags: &MetricTags) {}

    /// Called exactly once when a timed block ends, on every exit path
    fn record(&self, record: &TimingRecord);
}

/// Prints `--- time elapsed` lines to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct PrintSink;

impl MetricsSink for PrintSink {
    fn record(&self, record: &TimingRecord) {
        println!("{}", format_elapsed(record));
    }
}

/// Emits `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl MetricsSink for TracingSink {
    fn enter(&self, name: &str, tags: &MetricTags) {
        info!(metric = name, tags = %tags, "timing started");
    }

    fn record(&self, record: &TimingRecord) {
        info!(
            metric = %record.name,
            elapsed_s = record.elapsed.as_secs_f64(),
            tags = %record.tags,
            "time elapsed"
        );
    }
}

/// Keeps records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    entered: Mutex<Vec<String>>,
    records: Mutex<Vec<TimingRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of blocks that have started, in order
    pub fn entered(&self) -> Vec<String> {
        self.entered.lock().map(|v| v.clone()).unwrap_or_default()
    }

    /// Finished records, in order
    pub fn records(&self) -> Vec<TimingRecord> {
        self.records.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl MetricsSink for MemorySink {
    fn enter(&self, name: &str, _tags: &MetricTags) {
        if let Ok(mut entered) = self.entered.lock() {
            entered.push(name.to_string());
        }
    }

    fn record(&self, record: &TimingRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record.clone());
        }
    }
}

/// Fans records out to several sinks
#[derive(Default)]
pub struct MultiSink {
    sinks: Vec<Box<dyn MetricsSink>>,
}

impl MultiSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl MetricsSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl MetricsSink for MultiSink {
    fn enter(&self, name: &str, tags: &MetricTags) {
        for sink in &self.sinks {
            sink.enter(name, tags);
        }
    }

    fn record(&self, record: &TimingRecord) {
        for sink in &self.sinks {
            sink.record(record);
        }
    }
}

/// Times a code block: starts on construction, records when dropped.
pub struct LogTimeBlock<'a> {
    sink: &'a dyn MetricsSink,
    name: String,
    tags: MetricTags,
    start: Instant,
}

impl<'a> LogTimeBlock<'a> {
    pub fn new(sink: &'a dyn MetricsSink, name: impl Into<String>, tags: MetricTags) -> Self {
        let name = name.into();
        sink.enter(&name, &tags);
        Self {
            sink,
            name,
            tags,
            start: Instant::now(),
        }
    }

    /// Time since the block started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for LogTimeBlock<'_> {
    fn drop(&mut self) {
        let record = TimingRecord {
            name: std::mem::take(&mut self.name),
            elapsed: self.start.elapsed(),
            tags: std::mem::take(&mut self.tags),
        };
        self.sink.record(&record);
    }
}

/// Run `f` and record its wall time as `<name>.time`
pub fn time_call<T>(sink: &dyn MetricsSink, name: &str, f: impl FnOnce() -> T) -> T {
    let metric: String = name.chars().take(MAX_METRIC_NAME_LEN).collect();
    let _block = LogTimeBlock::new(sink, format!("{}.time", metric), MetricTags::new());
    f()
}

/// Console line for a finished record
pub fn format_elapsed(record: &TimingRecord) -> String {
    let mut line = format!(
        "--- time elapsed: {} = {:.6} s",
        record.name,
        record.elapsed.as_secs_f64()
    );
    if !record.tags.is_empty() {
        line.push_str(&format!(" [tags: {}]", record.tags));
    }
    line
}
