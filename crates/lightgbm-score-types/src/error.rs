//! Error types for lightgbm-score

use std::path::PathBuf;
use thiserror::Error;

/// Invalid or missing configuration, raised before anything is spawned
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not find lightgbm exec under path {}", .0.display())]
    ExecutableNotFound(PathBuf),

    #[error("No lightgbm executable given (use --lightgbm_exec or set lightgbm_exec in config)")]
    MissingExecutable,

    #[error("Input path not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Input directory {} contains no file", .0.display())]
    EmptyInputDirectory(PathBuf),

    #[error("Input directory {} contains {count} files, expected exactly one", .dir.display())]
    AmbiguousInputDirectory { dir: PathBuf, count: usize },

    #[error("No inferencing data given (use --data)")]
    MissingData,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("LightGBM exited with {}", describe_exit(.code))]
    ExternalToolFailure { code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "a signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
