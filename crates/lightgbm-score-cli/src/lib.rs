//! lightgbm-score CLI
//!
//! Runs the LightGBM executable in prediction mode and reports what it
//! printed and how it exited.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod output;
