//! Error types for the aider launcher.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading errors. Always fatal for the process.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Searched: {}", format_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("Configuration file '{path}' could not be read: {message}")]
    Unreadable { path: PathBuf, message: String },

    #[error("Configuration file '{path}' is invalid: {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("The following required fields are missing: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("'{0}' array is empty; add at least one edit format")]
    EmptyFormats(String),

    #[error("Vendors listed in 'vendors' but missing from 'models': {}", .0.join(", "))]
    VendorsWithoutModels(Vec<String>),

    #[error("Vendors with empty model arrays: {}", .0.join(", "))]
    EmptyModelLists(Vec<String>),

    #[error("Configuration error: {0}")]
    Other(String),
}

fn format_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "(no candidate paths)".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Other(err.to_string())
    }
}

/// A selected vendor has no resolvable credential.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("API key for {vendor} is not set or could not be loaded")]
    Missing {
        vendor: String,
        /// Human-readable list of every location that was checked.
        checked: Vec<String>,
    },

    #[error("Unknown vendor '{0}'")]
    UnknownVendor(String),
}

impl CredentialError {
    /// Remediation text listing the checked locations.
    pub fn remediation(&self) -> String {
        match self {
            CredentialError::Missing { checked, .. } => {
                let mut out = String::from(
                    "Define it as an environment variable or in your API keys file.\nChecked locations:",
                );
                for location in checked {
                    out.push_str(&format!("\n  - {}", location));
                }
                out
            }
            CredentialError::UnknownVendor(_) => {
                "The vendor is not part of the loaded configuration.".to_string()
            }
        }
    }
}

/// Unparseable or out-of-range menu input. Always recovered by reprompting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid choice: '{0}' is not a number")]
    NotANumber(String),

    #[error("Invalid choice: {choice} is outside 1-{max}")]
    OutOfRange { choice: usize, max: usize },
}

/// Failures around the external tool. Recovered by returning to the mode menu.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("'{program}' command not found. Ensure it is installed and in your PATH")]
    ToolNotFound { program: String },

    #[error("'{program}' command failed with exit status {code}")]
    NonZeroExit { program: String, code: i32 },

    #[error("'{program}' was terminated by a signal")]
    Terminated { program: String },

    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level error for the binary. Credential and launch errors are
/// recovered inside the wizard and never reach this level.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}
