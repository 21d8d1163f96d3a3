//! Config file next to the executable: aider_config.json

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Add the adjacent config file to the builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> (ConfigBuilder<DefaultState>, Option<PathBuf>) {
    if path.is_file() {
        debug!(config_path = %path.display(), "Using configuration next to executable");
        (
            builder.add_source(File::from(path).required(true)),
            Some(path.to_path_buf()),
        )
    } else {
        (builder, None)
    }
}
