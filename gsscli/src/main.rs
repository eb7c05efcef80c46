use clap::Parser;
use colored::*;
use gsslib::io::fs;
use gsslib::io::{GridProblem, QueryOutcome, SolveReport};
use gsslib::search::PatrolOutcome;
use gsslib::types::Cost;
use std::path::{Path, PathBuf};

/// Print an error message to stderr and exit with the given code.
macro_rules! fatal_error {
    ($code:expr, $($arg:tt)*) => {{
        eprintln!("{} {}", "FATAL ERROR:".red().bold(), format!($($arg)*));
        std::process::exit($code)
    }};
}

mod commands;

/// Command line interface for the grid search solver.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: commands::Command,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    args.command.run();
}
