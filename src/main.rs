use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use officehub::cli::Cli;

/// Environment variable holding the log filter, checked before `RUST_LOG`.
const LOG_ENV: &str = "OFFICEHUB_LOG";

fn init_logging() {
    let filter = std::env::var(LOG_ENV)
        .ok()
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    let output = cli.output();

    match cli.command.run(output).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
