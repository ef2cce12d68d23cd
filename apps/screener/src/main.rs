mod cli;
mod config;
mod errors;
mod extraction;
mod models;
mod screening;
mod session;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration first (fails on malformed threshold values)
    let config = Config::from_env()?;

    // Structured logging on stderr; stdout carries command output
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    match cli::handlers::run(cli, &config) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) if e.is_fatal() => Err(e.into()),
        Err(e) => {
            eprintln!("[{}] {}", e.code(), e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}
