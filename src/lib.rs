//! Core library entry for the `group-sync` CLI.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod ports;
pub mod sync;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// Loads `.env` if present, builds the configuration from the environment,
/// and executes one sync run against the live services.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or any sync stage
/// fails.
pub async fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match cli::Cli::try_parse_from(args) {
        Ok(_) => {}
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    }

    dotenvy::dotenv().ok();
    let config = config::Config::from_env();
    let ctx = context::ServiceContext::live(&config);
    commands::sync::run(&ctx).await
}
