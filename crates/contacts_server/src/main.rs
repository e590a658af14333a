//! Contacts server entry point.

use clap::Parser;
use contacts_server::{serve, Cli, ServerConfig};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::from(Cli::parse());

    if let Err(err) = contacts_core::init_logging(&config.log_level, config.log_dir.as_deref()) {
        eprintln!("failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=server_exit module=http status=error error={err}");
            eprintln!("contacts-server: {err}");
            ExitCode::FAILURE
        }
    }
}
