//! Configuration loader: defaults, then file sources, then validation.

use super::merge::merge_policy;
use super::paths::{adjacent_config_path, global_config_base};
use super::sources::{adjacent_file, global_file};
use super::{LauncherConfig, RawConfig};
use crate::error::ConfigError;
use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from the default locations: global config, then the file next to
    /// the executable (higher precedence).
    pub fn load() -> Result<LauncherConfig, ConfigError> {
        Self::load_from_locations(global_config_base(), adjacent_config_path())
    }

    /// Load from an explicit file only (the `--config` flag).
    pub fn load_from_file(path: &Path) -> Result<LauncherConfig, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound {
                searched: vec![path.to_path_buf()],
            });
        }
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        Self::finish(builder, path)
    }

    /// Load from the given global base (extension probed) and adjacent file.
    pub fn load_from_locations(
        global_base: Option<PathBuf>,
        adjacent: Option<PathBuf>,
    ) -> Result<LauncherConfig, ConfigError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        let mut searched = Vec::new();
        let mut last_used: Option<PathBuf> = None;

        if let Some(base) = global_base.as_deref() {
            let (next, used) = global_file::add_to_builder(builder, base);
            builder = next;
            searched.push(base.with_extension("{json,toml}"));
            last_used = used.or(last_used);
        }
        if let Some(path) = adjacent.as_deref() {
            let (next, used) = adjacent_file::add_to_builder(builder, path);
            builder = next;
            searched.push(path.to_path_buf());
            last_used = used.or(last_used);
        }

        let Some(primary) = last_used else {
            return Err(ConfigError::NotFound { searched });
        };
        Self::finish(builder, &primary)
    }

    fn finish(
        builder: ConfigBuilder<DefaultState>,
        primary: &Path,
    ) -> Result<LauncherConfig, ConfigError> {
        let invalid = |e: config::ConfigError| ConfigError::Invalid {
            path: primary.to_path_buf(),
            message: e.to_string(),
        };
        let raw: RawConfig = builder
            .build()
            .map_err(invalid)?
            .try_deserialize()
            .map_err(invalid)?;
        let config = raw.validate()?;
        info!(
            config_path = %primary.display(),
            vendors = config.vendors.len(),
            "Configuration loaded"
        );
        Ok(config)
    }
}
