//! Global config file source: $XDG_CONFIG_HOME/aider-launch/config.{json,toml}

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

const EXTENSIONS: &[&str] = &["json", "toml"];

/// Existing global config file for `base`, first matching extension wins.
pub fn existing_path(base: &Path) -> Option<PathBuf> {
    EXTENSIONS
        .iter()
        .map(|ext| base.with_extension(ext))
        .find(|p| p.is_file())
}

/// Add the global config file to the builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    base: &Path,
) -> (ConfigBuilder<DefaultState>, Option<PathBuf>) {
    match existing_path(base) {
        Some(path) => {
            debug!(config_path = %path.display(), "Using global configuration file");
            let builder = builder.add_source(File::from(path.as_path()).required(true));
            (builder, Some(path))
        }
        None => {
            debug!(config_base = %base.display(), "No global configuration file");
            (builder, None)
        }
    }
}
