//! External tool execution.

use crate::command::CommandLine;
use crate::error::LaunchError;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{error, info};

/// Runs the assembled command and reports its exit code.
pub trait CommandExecutor {
    /// Locate `program` on the execution path.
    fn locate(&self, program: &str) -> Result<PathBuf, LaunchError>;

    /// Run `command` to completion, inheriting stdio. Returns the exit code.
    fn execute(&self, command: &CommandLine) -> Result<i32, LaunchError>;
}

/// Spawns real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

impl CommandExecutor for ProcessExecutor {
    fn locate(&self, program: &str) -> Result<PathBuf, LaunchError> {
        which::which(program).map_err(|_| LaunchError::ToolNotFound {
            program: program.to_string(),
        })
    }

    fn execute(&self, command: &CommandLine) -> Result<i32, LaunchError> {
        let program = command.program().to_string();
        info!(
            program = %program,
            args = %command.render(true),
            "Launching external tool"
        );
        let status = Command::new(&program)
            .args(command.arg_values())
            .status()
            .map_err(|source| {
                if source.kind() == std::io::ErrorKind::NotFound {
                    LaunchError::ToolNotFound {
                        program: program.clone(),
                    }
                } else {
                    LaunchError::Spawn {
                        program: program.clone(),
                        source,
                    }
                }
            })?;
        match status.code() {
            Some(code) => {
                info!(program = %program, code, "External tool exited");
                Ok(code)
            }
            None => {
                error!(program = %program, "External tool terminated by signal");
                Err(LaunchError::Terminated { program })
            }
        }
    }
}

/// Contents of the tool's own config file, if it exists and is readable.
pub fn read_tool_config_preview(path: &Path) -> Option<Result<String, std::io::Error>> {
    if !path.exists() {
        return None;
    }
    Some(std::fs::read_to_string(path))
}
