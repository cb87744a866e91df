//! lightgbm-score - LightGBM CLI inferencing
//!
//! Runs the LightGBM executable on a dataset and model and relays its output.

use lightgbm_score_cli::cli::Cli;
use lightgbm_score_cli::{commands, logging};

fn main() {
    let cli = Cli::parse_known(std::env::args_os().map(|a| a.to_string_lossy().into_owned()));
    logging::init(cli.verbose);

    match commands::execute(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
