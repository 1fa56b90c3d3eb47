use std::process::ExitCode;

use clap::error::ErrorKind;
use image_transform_npp::app;
use image_transform_npp::cli::Cli;
use image_transform_npp::image_pipeline::TransformError;
use image_transform_npp::logger::{self, error, info};

fn main() -> ExitCode {
    let cli = match Cli::try_parse_lenient(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let err = TransformError::InvalidArgument(e.to_string());
            eprintln!("Program error! {}", err.to_string().trim_end());
            eprintln!("Aborting.");
            return ExitCode::FAILURE;
        }
    };

    logger::init(cli.verbose);

    info!("image_transform_npp Starting...");

    match app::run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Program error! {}", e);
            error!("Aborting.");
            ExitCode::FAILURE
        }
    }
}
