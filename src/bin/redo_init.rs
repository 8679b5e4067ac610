use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    redoer::diagnostics::init();
    let dirs: Vec<String> = env::args().skip(1).collect();
    match redoer::commands::init(&dirs) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("redo-init: {err:#}");
            ExitCode::from(redoer::error::exit_code_for(&err) as u8)
        }
    }
}
