//! RAX FTP Client - Entry Point
//!
//! Downloads a single file from an FTP server in passive mode (RFC 959 subset).

use clap::Parser;
use log::info;
use std::process::ExitCode;

use rax_ftp_client::cli::Cli;
use rax_ftp_client::error::handlers::{exit_code, report_error};
use rax_ftp_client::utils::logging::setup_logging;
use rax_ftp_client::{ClientConfig, FtpClient, FtpClientError};

#[tokio::main]
async fn main() -> ExitCode {
    // Usage errors exit with 1; --help and --version exit with 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    setup_logging();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::from(exit_code(&err))
        }
    }
}

async fn run(cli: Cli) -> Result<(), FtpClientError> {
    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }

    info!("Launching FTP download...");
    let client = FtpClient::new(config);
    let report = client.download(&cli.url).await?;

    info!(
        "Download successful: {} ({} bytes, final reply {})",
        report.destination.display(),
        report.bytes,
        report.final_code
    );
    Ok(())
}
