//! Output formatting module

use lightgbm_score_types::{InvocationResult, OutputFormat, Result};

pub fn output_result(output_format: OutputFormat, result: &InvocationResult) -> Result<()> {
    println!("{}", render_result(output_format, result)?);
    Ok(())
}

pub fn render_result(output_format: OutputFormat, result: &InvocationResult) -> Result<String> {
    match output_format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Table => Ok(format!(
            "LightGBM stdout: {}\nLightGBM stderr: {}\nLightGBM return code: {}",
            result.stdout,
            result.stderr,
            result.exit_code_label()
        )),
    }
}
