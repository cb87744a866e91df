//! LightGBM CLI command assembly

use lightgbm_score_types::InvocationArgs;
use std::path::PathBuf;

/// Program plus ordered `key=value` tokens for the LightGBM CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Program followed by its arguments
    pub fn to_vec(&self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(self.args.len() + 1);
        tokens.push(self.program.display().to_string());
        tokens.extend(self.args.iter().cloned());
        tokens
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", shell_words::join(self.to_vec()))
    }
}

/// Build the prediction command for `args`
pub fn build_command(args: &InvocationArgs, verbosity: i32) -> CommandLine {
    let mut tokens = vec![
        "task=prediction".to_string(),
        format!("data={}", args.data_path.display()),
    ];
    if let Some(ref model) = args.model_path {
        tokens.push(format!("input_model={}", model.display()));
    }
    tokens.push(format!("verbosity={}", verbosity));
    if let Some(ref output) = args.output_path {
        tokens.push(format!("output_result={}", output.display()));
    }

    CommandLine {
        program: args.executable_path.clone(),
        args: tokens,
    }
}
