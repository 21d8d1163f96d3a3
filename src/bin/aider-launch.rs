//! aider-launch binary
//!
//! Interactive launcher for the aider coding assistant.

use aider_launch::cli::{Cli, RunContext};
use aider_launch::config::ConfigLoader;
use aider_launch::launch::ProcessExecutor;
use aider_launch::logging::{init_logging, LoggingConfig};
use aider_launch::wizard::TerminalConsole;
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("aider-launch starting");

    let context = match RunContext::new(cli.config.clone(), cli.keys_file.clone()) {
        Ok(ctx) => {
            info!("Run context initialized");
            ctx
        }
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", aider_launch::cli::map_error(&e));
            process::exit(1);
        }
    };

    let mut console = TerminalConsole::new();
    match context.execute(cli.command.as_ref(), &mut console, &ProcessExecutor) {
        Ok(output) => {
            if let Some(text) = output.text {
                println!("{}", text);
            }
            info!(exit_code = output.exit_code, "Command completed");
            process::exit(output.exit_code);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", aider_launch::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let loaded = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let mut config = loaded.ok().map(|c| c.logging).unwrap_or_default();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
        // An explicit --log-output value still takes precedence below.
        if config.output == "file" {
            config.output = "file+stderr".to_string();
        }
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}
