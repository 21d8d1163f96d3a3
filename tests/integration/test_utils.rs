//! Shared test utilities for integration tests
//!
//! Fixture files, a recording executor, and serialized access to the process
//! environment for tests that must touch `HOME` or `XDG_CONFIG_HOME`.

use aider_launch::command::CommandLine;
use aider_launch::error::LaunchError;
use aider_launch::launch::CommandExecutor;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

pub const SAMPLE_CONFIG: &str = r#"{
  "vendors": ["OPENAI", "ANTHROPIC", "GOOGLE"],
  "models": {
    "OPENAI": ["gpt-4o", "o3"],
    "ANTHROPIC": ["claude-3-5-haiku-20241022"],
    "GOOGLE": ["gemini/gemini-2.5-pro"]
  },
  "edit_formats": {
    "code": ["whole", "diff"],
    "architect": ["editor-whole", "editor-diff"]
  },
  "tool": { "program": "aider", "config_preview": "" }
}"#;

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// Environment variable state to restore after test
struct EnvState {
    home: Option<String>,
    xdg_config_home: Option<String>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            home: std::env::var("HOME").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
        }
    }

    fn restore(self) {
        match self.home {
            Some(orig) => std::env::set_var("HOME", orig),
            None => std::env::remove_var("HOME"),
        }
        match self.xdg_config_home {
            Some(orig) => std::env::set_var("XDG_CONFIG_HOME", orig),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }
}

/// Run `f` with `XDG_CONFIG_HOME` set to the temp dir and `HOME` to `<tmp>/home`.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_home).unwrap();
    std::env::set_var("HOME", &test_home);
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path());

    let result = f();

    env_state.restore();
    result
}

/// Executor that records commands instead of running them.
pub struct RecordingExecutor {
    pub installed: bool,
    pub exit_codes: RefCell<Vec<i32>>,
    pub runs: RefCell<Vec<Vec<String>>>,
}

impl RecordingExecutor {
    /// Tool present; each launch exits with the next code, then 0.
    pub fn with_exit_codes(codes: &[i32]) -> Self {
        Self {
            installed: true,
            exit_codes: RefCell::new(codes.iter().rev().copied().collect()),
            runs: RefCell::new(Vec::new()),
        }
    }

    pub fn missing_tool() -> Self {
        Self {
            installed: false,
            ..Self::with_exit_codes(&[])
        }
    }

    pub fn runs(&self) -> Vec<Vec<String>> {
        self.runs.borrow().clone()
    }
}

impl CommandExecutor for RecordingExecutor {
    fn locate(&self, program: &str) -> Result<PathBuf, LaunchError> {
        if self.installed {
            Ok(PathBuf::from("/opt/bin").join(program))
        } else {
            Err(LaunchError::ToolNotFound {
                program: program.to_string(),
            })
        }
    }

    fn execute(&self, command: &CommandLine) -> Result<i32, LaunchError> {
        self.runs.borrow_mut().push(command.tokens());
        Ok(self.exit_codes.borrow_mut().pop().unwrap_or(0))
    }
}
