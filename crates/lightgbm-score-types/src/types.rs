//! Invocation data passed between resolver, builder and runner

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Validated arguments for one invocation of the LightGBM CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationArgs {
    /// Path to the lightgbm executable (an existing file)
    pub executable_path: PathBuf,
    /// Inferencing data file
    pub data_path: PathBuf,
    /// Exported model file
    pub model_path: Option<PathBuf>,
    /// Predictions file inside the requested output directory
    pub output_path: Option<PathBuf>,
    /// Tokens nobody claimed, kept for callers further down the line
    pub unknown_args: Vec<String>,
}

/// Captured outcome of one invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResult {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub elapsed_secs: f64,
    pub started_at: DateTime<Utc>,
}

impl InvocationResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Exit code as printed to the console
    pub fn exit_code_label(&self) -> String {
        match self.exit_code {
            Some(code) => code.to_string(),
            None => "signal".to_string(),
        }
    }
}

/// Properties attached to a timing record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricTags(BTreeMap<String, String>);

impl MetricTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl std::fmt::Display for MetricTags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}': '{}'", key, value)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_tags_display() {
        let tags = MetricTags::new()
            .with("task", "score")
            .with("framework", "lightgbm_cli");
        assert_eq!(
            tags.to_string(),
            "{'framework': 'lightgbm_cli', 'task': 'score'}"
        );
        assert_eq!(MetricTags::new().to_string(), "{}");
    }

    #[test]
    fn test_exit_code_label() {
        let mut result = InvocationResult {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: Some(7),
            elapsed_secs: 0.0,
            started_at: Utc::now(),
        };
        assert_eq!(result.exit_code_label(), "7");
        assert!(!result.success());

        result.exit_code = None;
        assert_eq!(result.exit_code_label(), "signal");
    }
}
