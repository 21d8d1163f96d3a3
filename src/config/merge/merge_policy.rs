//! Merge rules: defaults, override order, conflict handling.
//!
//! Later sources override earlier ones key by key; lists are replaced whole,
//! tables (such as `models`) are merged.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("tool.program", crate::command::DEFAULT_PROGRAM)?
        .set_default("tool.config_preview", "~/.aider.conf.yml")?
        .set_default("logging.level", "info")?
        .set_default("logging.output", "file")
}
