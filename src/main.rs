use std::process::ExitCode;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = nzb_move::cli::parse();
    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(e.code()),
    }
}
