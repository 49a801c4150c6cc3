//! bioget binary entry point.

use clap::Parser;
use tracing::{error, info};

use bioget::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();

    let log_format = cli.log_format.into();
    if let Err(e) = bioget_core::init_logging(cli.verbose, cli.log_file.as_deref(), log_format) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(version = env!("CARGO_PKG_VERSION"), "bioget starting");

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("bioget: failed to create runtime: {}", e);
            std::process::exit(1);
        }
    };

    let result = rt.block_on(async {
        match &cli.command {
            Command::Download(args) => bioget::commands::run_download(&cli, args).await,
        }
    });

    if let Err(e) = result {
        error!(error = %e, code = e.diagnostic_code(), "command failed");
        eprintln!("bioget: {}", e);
        std::process::exit(e.diagnostic_code());
    }
}
