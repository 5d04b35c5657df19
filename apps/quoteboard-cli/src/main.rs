//! # Quoteboard Entry Point
//!
//! The actual setup is in lib.rs for better testability.

use clap::Parser;
use quoteboard_cli::cli::Cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    quoteboard_cli::init_tracing();

    let cli = Cli::parse();
    match quoteboard_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(quoteboard_cli::exit_code(&e))
        }
    }
}
