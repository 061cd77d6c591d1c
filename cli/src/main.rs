use erasure_cli_lib::{
    args::parse_args,
    commands::{init_logging, run},
};
use erasure_core::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let (args, action) = parse_args();
    if let Err(err) = init_logging(&args) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match run(&args, &action) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
