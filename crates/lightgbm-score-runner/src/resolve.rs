//! Argument resolution: raw CLI values to validated invocation arguments

use crate::config::Config;
use crate::io::input_file_path;
use lightgbm_score_types::{ConfigError, InvocationArgs, Result};
use std::path::PathBuf;
use tracing::debug;

/// Values as they arrive from the command line, before validation
#[derive(Debug, Clone, Default)]
pub struct RawArgs {
    pub lightgbm_exec: Option<PathBuf>,
    pub data: PathBuf,
    pub model: Option<PathBuf>,
    /// Output directory; the predictions file is created inside it
    pub output: Option<PathBuf>,
    pub unknown: Vec<String>,
}

/// Validate raw arguments and prepare the output location.
///
/// The executable falls back to `config.lightgbm_exec`. It must be an
/// existing file. Nothing is created on disk unless every check passes.
pub fn resolve_args(raw: RawArgs, config: &Config) -> Result<InvocationArgs> {
    let executable_path = raw
        .lightgbm_exec
        .or_else(|| config.lightgbm_exec.clone())
        .ok_or(ConfigError::MissingExecutable)?;

    if !executable_path.is_file() {
        return Err(ConfigError::ExecutableNotFound(executable_path).into());
    }

    let data_path = input_file_path(&raw.data)?;
    let model_path = raw.model.as_deref().map(input_file_path).transpose()?;

    let output_path = match raw.output {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            Some(dir.join(&config.output_file_name))
        }
        None => None,
    };

    if !raw.unknown.is_empty() {
        debug!(unknown = ?raw.unknown, "ignoring unknown arguments");
    }

    Ok(InvocationArgs {
        executable_path,
        data_path,
        model_path,
        output_path,
        unknown_args: raw.unknown,
    })
}
