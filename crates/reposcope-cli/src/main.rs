//! # reposcope CLI
//!
//! Detects the technology stack of a GitHub repository (or a local checkout)
//! and reports capability gaps per category.
//!
//! Run `reposcope --help` for usage information.

mod cli;
pub mod ui;

use std::process::ExitCode;

fn main() -> ExitCode {
    cli::run()
}
