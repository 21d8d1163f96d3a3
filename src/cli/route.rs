//! CLI route: single route table and run context. Dispatches to the wizard
//! and presentation.

use crate::cli::parse::Commands;
use crate::cli::presentation::{format_status_json, format_status_text};
use crate::config::{ConfigLoader, LauncherConfig};
use crate::credentials::{CredentialMap, CredentialResolver, Environment, ProcessEnvironment};
use crate::error::AppError;
use crate::launch::CommandExecutor;
use crate::status::StatusReport;
use crate::vendor::VendorRegistry;
use crate::wizard::{Console, Wizard};
use std::path::PathBuf;
use tracing::{debug, info};

/// Result of one CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// Text for stdout; the interactive session prints its own screens.
    pub text: Option<String>,
    pub exit_code: i32,
}

/// Runtime context for CLI execution: validated config, vendor table and
/// resolved credentials. Built once per process.
pub struct RunContext {
    config: LauncherConfig,
    registry: VendorRegistry,
    credentials: CredentialMap,
}

impl RunContext {
    /// Load configuration and resolve credentials from the process environment.
    pub fn new(config_path: Option<PathBuf>, keys_file: Option<PathBuf>) -> Result<Self, AppError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        let mut env = ProcessEnvironment;
        Ok(Self::resolve(config, keys_file, &mut env))
    }

    /// Resolve credentials for an already loaded configuration.
    pub fn resolve(
        config: LauncherConfig,
        keys_file: Option<PathBuf>,
        env: &mut dyn Environment,
    ) -> Self {
        let registry = config.vendor_registry();
        let credentials = CredentialResolver::new(&registry)
            .with_keys_file(keys_file)
            .resolve(env);
        Self::from_parts(config, credentials)
    }

    pub fn from_parts(config: LauncherConfig, credentials: CredentialMap) -> Self {
        let registry = config.vendor_registry();
        debug!(vendors = registry.len(), "Run context ready");
        Self {
            config,
            registry,
            credentials,
        }
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    pub fn credentials(&self) -> &CredentialMap {
        &self.credentials
    }

    /// Route a parsed command. No subcommand runs the interactive session.
    pub fn execute(
        &self,
        command: Option<&Commands>,
        console: &mut dyn Console,
        executor: &dyn CommandExecutor,
    ) -> Result<RunOutput, AppError> {
        match command {
            None => {
                info!("Starting interactive session");
                let wizard = Wizard::new(&self.config, &self.registry, &self.credentials, executor);
                let report = wizard.run(console)?;
                Ok(RunOutput {
                    text: None,
                    exit_code: report.exit_code(),
                })
            }
            Some(Commands::Status { format }) => {
                let report = StatusReport::collect(&self.config, &self.registry, &self.credentials);
                let text = match format.as_str() {
                    "json" => format_status_json(&report),
                    _ => format_status_text(&report),
                };
                Ok(RunOutput {
                    text: Some(text),
                    exit_code: 0,
                })
            }
        }
    }
}
