use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    redoer::diagnostics::init();
    let targets: Vec<String> = env::args().skip(1).collect();
    match redoer::commands::ifchange(&targets) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("redo-ifchange: {err:#}");
            ExitCode::from(redoer::error::exit_code_for(&err) as u8)
        }
    }
}
