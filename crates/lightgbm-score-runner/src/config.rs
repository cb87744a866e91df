//! Configuration management for lightgbm-score
//!
//! Config stored at: ~/.config/lightgbm-score/config.json

use lightgbm_score_types::{OutputFormat, Result, TimingOutput};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name written inside `--output`
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "predictions.txt";

/// Verbosity passed through to the LightGBM CLI
pub const DEFAULT_VERBOSITY: i32 = 2;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Executable used when `--lightgbm_exec` is not given
    #[serde(default)]
    pub lightgbm_exec: Option<PathBuf>,

    /// `verbosity=` value handed to LightGBM
    #[serde(default = "default_verbosity")]
    pub verbosity: i32,

    /// Predictions file name created inside the output directory
    #[serde(default = "default_output_file_name")]
    pub output_file_name: String,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Exit with LightGBM's own exit code instead of always 0
    #[serde(default)]
    pub propagate_exit_code: bool,

    /// Where timing records are written
    #[serde(default)]
    pub timing: TimingOutput,
}

fn default_verbosity() -> i32 {
    DEFAULT_VERBOSITY
}

fn default_output_file_name() -> String {
    DEFAULT_OUTPUT_FILE_NAME.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lightgbm_exec: None,
            verbosity: default_verbosity(),
            output_file_name: default_output_file_name(),
            output_format: OutputFormat::default(),
            propagate_exit_code: false,
            timing: TimingOutput::default(),
        }
    }
}

impl Config {
    /// Config file under `config_dir`
    fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join("lightgbm-score").join("config.json")
    }

    /// Default config file path, if the platform has a config directory
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| Self::path_in(&dir))
    }

    /// Load config from the default location, or fall back to defaults.
    ///
    /// A platform without a config directory behaves like a missing file.
    pub fn load() -> Result<Self> {
        Self::load_in(dirs::config_dir())
    }

    fn load_in(config_dir: Option<PathBuf>) -> Result<Self> {
        match config_dir {
            Some(dir) => Self::load_from(&Self::path_in(&dir)),
            None => Ok(Config::default()),
        }
    }

    /// Load config from `path`, or fall back to defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "LightGBM Score Configuration")?;
        writeln!(f, "============================")?;
        writeln!(f)?;
        writeln!(
            f,
            "LightGBM exec:    {}",
            self.lightgbm_exec
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(not set)".to_string())
        )?;
        writeln!(f, "Verbosity:        {}", self.verbosity)?;
        writeln!(f, "Output file name: {}", self.output_file_name)?;
        writeln!(f, "Output format:    {}", self.output_format)?;
        writeln!(f, "Propagate exit:   {}", self.propagate_exit_code)?;
        writeln!(f, "Timing output:    {}", self.timing)?;

        if let Some(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:      {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.verbosity, 2);
        assert_eq!(config.output_file_name, "predictions.txt");
        assert!(!config.propagate_exit_code);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"verbosity": -1, "output_format": "json"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.verbosity, -1);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.output_file_name, "predictions.txt");
        assert_eq!(config.timing, TimingOutput::Print);
    }

    #[test]
    fn test_load_written_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            lightgbm_exec: Some(PathBuf::from("/opt/lightgbm/lightgbm")),
            propagate_exit_code: true,
            timing: TimingOutput::Both,
            ..Config::default()
        };
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_no_config_dir_gives_defaults() {
        assert_eq!(Config::load_in(None).unwrap(), Config::default());
    }

    #[test]
    fn test_config_dir_without_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_in(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_dir_with_file() {
        let dir = tempdir().unwrap();
        let app_dir = dir.path().join("lightgbm-score");
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(app_dir.join("config.json"), r#"{"verbosity": 0}"#).unwrap();

        let config = Config::load_in(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.verbosity, 0);
    }

    #[test]
    fn test_display_summary() {
        let config = Config {
            lightgbm_exec: Some(PathBuf::from("/opt/lightgbm/lightgbm")),
            ..Config::default()
        };
        let text = config.to_string();
        assert!(text.contains("LightGBM exec:    /opt/lightgbm/lightgbm"));
        assert!(text.contains("Verbosity:        2"));
        assert!(text.contains("Output file name: predictions.txt"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
