use clap::Parser;
use cwl_upgrader::cli::{self, Args};
use cwl_upgrader::core::{AppError, DefaultErrorReporter, ErrorReporter};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    let _logging = match cwl_upgrader::logging::init(&args) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("[ERROR] CWL-CONFIG-001: {:#}", err);
            return ExitCode::FAILURE;
        }
    };

    match cli::run(args) {
        Ok(code) => code,
        Err(err) => {
            match err.downcast_ref::<AppError>() {
                Some(app_error) => DefaultErrorReporter::new().report_error(app_error),
                None => eprintln!("[ERROR] {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}
