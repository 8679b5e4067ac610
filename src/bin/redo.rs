use std::env;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use redoer::cli::{dispatch, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.verbose {
        0 => {}
        1 => env::set_var("REDO_VERBOSE", "1"),
        2 => env::set_var("REDO_DEBUG", "1"),
        _ => env::set_var("REDO_TRACE", "1"),
    }
    if cli.trace {
        env::set_var("REDO_TRACE", "1");
    }
    redoer::diagnostics::init();

    match dispatch(cli.command, cli.targets) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "redo:".red().bold());
            ExitCode::from(redoer::error::exit_code_for(&err) as u8)
        }
    }
}
