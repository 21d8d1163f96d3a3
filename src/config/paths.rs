//! Candidate configuration file locations.

use std::path::PathBuf;

/// File name looked up next to the executable.
pub const ADJACENT_CONFIG_FILE: &str = "aider_config.json";

/// Global config base path without extension:
/// `$XDG_CONFIG_HOME/aider-launch/config`, else `~/.config/aider-launch/config`.
/// The extension (`.json`, `.toml`) is probed by the loader.
pub fn global_config_base() -> Option<PathBuf> {
    let config_home = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(config_home.join("aider-launch").join("config"))
}

/// `aider_config.json` in the directory of the running executable, symlinks resolved.
pub fn adjacent_config_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let exe = exe.canonicalize().unwrap_or(exe);
    exe.parent().map(|dir| dir.join(ADJACENT_CONFIG_FILE))
}
