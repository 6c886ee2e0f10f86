use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    match labelpad::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
