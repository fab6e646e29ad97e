//! Outseta API CLI binary.
//!
//! A command-line interface for interacting with the Outseta API.

use clap::Parser;
use outseta::cli::{init_logging, run, Cli};
use outseta::OutsetaClient;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let client = match OutsetaClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set OUTSETA_URL and OUTSETA_KEY (or OUTSETA_ACCESS_TOKEN)");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout().lock();
    match run(&client, cli, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
