//! CLI definition using clap

use clap::{CommandFactory, Parser};
use lightgbm_score_types::OutputFormat;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lightgbm-score")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "LightGBM CLI inferencing")]
#[command(long_about = None)]
pub struct Cli {
    /// Path to lightgbm executable (file path). Uses config value if not specified.
    #[arg(long = "lightgbm_exec", help_heading = "Input Data")]
    pub lightgbm_exec: Option<PathBuf>,

    /// Inferencing data location (file path, or directory holding one file)
    #[arg(long, required_unless_present = "show_config", help_heading = "Input Data")]
    pub data: Option<PathBuf>,

    /// Exported model location
    #[arg(long, help_heading = "Input Data")]
    pub model: Option<PathBuf>,

    /// Inferencing output location (directory, predictions.txt is written inside)
    #[arg(long, help_heading = "Input Data")]
    pub output: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f')]
    pub format: Option<OutputFormat>,

    /// Exit with LightGBM's exit code instead of 0
    #[arg(long)]
    pub fail_on_error: bool,

    /// Config file to use instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub show_config: bool,

    /// Verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Arguments not recognized by this tool
    #[arg(skip)]
    pub unknown: Vec<String>,
}

impl Cli {
    /// Parse known arguments, exiting on error like `Cli::parse`
    pub fn parse_known<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self::try_parse_known(args).unwrap_or_else(|e| e.exit())
    }

    /// Parse known arguments and collect the rest into `unknown`
    pub fn try_parse_known<I>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = String>,
    {
        let (known, unknown) = split_known_args(args);
        let mut cli = Self::try_parse_from(known)?;
        cli.unknown = unknown;
        Ok(cli)
    }
}

/// Flags this CLI understands, mapped to whether they take a value
struct FlagTable {
    long: HashMap<String, bool>,
    short: HashMap<char, bool>,
}

impl FlagTable {
    fn from_cli() -> Self {
        let mut command = Cli::command();
        command.build();

        let mut long = HashMap::new();
        let mut short = HashMap::new();
        for arg in command.get_arguments() {
            let takes_value = arg.get_action().takes_values();
            if let Some(name) = arg.get_long() {
                long.insert(name.to_string(), takes_value);
            }
            if let Some(c) = arg.get_short() {
                short.insert(c, takes_value);
            }
        }
        Self { long, short }
    }

    /// Whether a group like `vf` is known, and if so whether it needs the
    /// next token as a value.
    ///
    /// The first value-taking flag consumes the rest of the group, so
    /// `-fjson` is complete while `-vf` still wants a value.
    fn short_group(&self, group: &str) -> Option<bool> {
        let mut chars = group.chars().peekable();
        while let Some(c) = chars.next() {
            if *self.short.get(&c)? {
                return Some(chars.peek().is_none());
            }
        }
        Some(false)
    }
}

fn is_flag(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-') && token.parse::<f64>().is_err()
}

/// Split argv into tokens clap knows about and everything else.
///
/// The first token (program name) is always kept. An unknown flag takes
/// the non-flag tokens that follow it along into `unknown`. Everything
/// after a bare `--` is unknown.
pub fn split_known_args<I>(args: I) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator<Item = String>,
{
    let flags = FlagTable::from_cli();
    let mut known = Vec::new();
    let mut unknown = Vec::new();
    let mut tokens = args.into_iter().peekable();

    if let Some(program) = tokens.next() {
        known.push(program);
    }

    while let Some(token) = tokens.next() {
        if token == "--" {
            unknown.extend(tokens.by_ref());
            break;
        }

        let takes_value = if let Some(rest) = token.strip_prefix("--") {
            let (name, inline) = match rest.split_once('=') {
                Some((name, _)) => (name, true),
                None => (rest, false),
            };
            flags.long.get(name).map(|&takes| takes && !inline)
        } else if is_flag(&token) {
            flags.short_group(&token[1..])
        } else {
            // stray positional
            unknown.push(token);
            continue;
        };

        match takes_value {
            Some(takes_value) => {
                known.push(token);
                if takes_value {
                    if let Some(value) = tokens.next() {
                        known.push(value);
                    }
                }
            }
            None => {
                unknown.push(token);
                while let Some(value) = tokens.next_if(|t| !is_flag(t)) {
                    unknown.push(value);
                }
            }
        }
    }

    (known, unknown)
}
