//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::config::EXAMPLE_CONFIG;
use crate::error::{AppError, ConfigError};

/// Map an application error to the message printed on stderr.
pub fn map_error(e: &AppError) -> String {
    match e {
        AppError::Config(ConfigError::NotFound { .. }) => format!(
            "Error: {}\n\nCreate a configuration file like this example:\n{}",
            e, EXAMPLE_CONFIG
        ),
        AppError::Config(_) => format!("Error: {}\nPlease fix the configuration file.", e),
        _ => format!("Error: {}", e),
    }
}
