//! Configuration System
//!
//! Vendors, per-vendor model lists and the two edit-format lists, plus the
//! tool, logging and vendor-override settings. Loaded once at startup through
//! [`ConfigLoader`]; any error here is fatal for the process.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use crate::selection::Mode;
use crate::vendor::{VendorOverride, VendorRegistry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

mod facade;
mod merge;
mod paths;
mod sources;

pub use facade::ConfigLoader;
pub use paths::{adjacent_config_path, global_config_base};

/// Example configuration shown when no configuration file can be found.
pub const EXAMPLE_CONFIG: &str = r#"{
  "vendors": ["OPENAI", "ANTHROPIC"],
  "models": {
    "OPENAI": ["gpt-4o", "gpt-4-turbo"],
    "ANTHROPIC": ["claude-3-5-haiku-20241022"]
  },
  "edit_formats": {
    "code": ["whole", "diff"],
    "architect": ["editor-whole", "editor-diff"]
  }
}"#;

/// Configuration as read from the layered sources, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub vendors: Option<Vec<String>>,
    #[serde(default)]
    pub models: Option<HashMap<String, Vec<String>>>,
    #[serde(default)]
    pub edit_formats: Option<RawEditFormats>,
    #[serde(default)]
    pub tool: ToolConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub vendor_overrides: HashMap<String, VendorOverride>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEditFormats {
    #[serde(default)]
    pub code: Option<Vec<String>>,
    #[serde(default)]
    pub architect: Option<Vec<String>>,
}

/// External tool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Program name or path of the external tool
    #[serde(default = "default_program")]
    pub program: String,

    /// Tool configuration file shown before launch; `~` expands to home
    #[serde(default = "default_config_preview")]
    pub config_preview: String,
}

fn default_program() -> String {
    crate::command::DEFAULT_PROGRAM.to_string()
}

fn default_config_preview() -> String {
    "~/.aider.conf.yml".to_string()
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            config_preview: default_config_preview(),
        }
    }
}

impl ToolConfig {
    /// Preview path with a leading `~` expanded.
    pub fn config_preview_path(&self) -> Option<PathBuf> {
        let raw = self.config_preview.trim();
        if raw.is_empty() {
            return None;
        }
        if let Some(rest) = raw.strip_prefix("~/") {
            let home = directories::BaseDirs::new()?.home_dir().to_path_buf();
            return Some(home.join(rest));
        }
        Some(PathBuf::from(raw))
    }
}

/// Edit formats per mode category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditFormats {
    pub code: Vec<String>,
    pub architect: Vec<String>,
}

impl EditFormats {
    pub fn for_mode(&self, mode: Mode) -> &[String] {
        match mode {
            Mode::Code => &self.code,
            Mode::Architect => &self.architect,
        }
    }
}

/// Validated configuration; immutable for the session.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    pub vendors: Vec<String>,
    pub models: HashMap<String, Vec<String>>,
    pub edit_formats: EditFormats,
    pub tool: ToolConfig,
    pub logging: LoggingConfig,
    pub vendor_overrides: HashMap<String, VendorOverride>,
}

impl LauncherConfig {
    /// Models for `vendor`; empty for unknown vendors.
    pub fn models_for(&self, vendor: &str) -> &[String] {
        self.models.get(vendor).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Descriptor table for the configured vendors.
    pub fn vendor_registry(&self) -> VendorRegistry {
        VendorRegistry::from_vendors(&self.vendors, &self.vendor_overrides)
    }
}

impl RawConfig {
    /// Check required fields and list contents.
    pub fn validate(self) -> Result<LauncherConfig, ConfigError> {
        let mut missing = Vec::new();
        if self.vendors.is_none() {
            missing.push("vendors".to_string());
        }
        if self.models.is_none() {
            missing.push("models".to_string());
        }
        match &self.edit_formats {
            None => missing.push("edit_formats".to_string()),
            Some(formats) => {
                if formats.code.is_none() {
                    missing.push("edit_formats.code".to_string());
                }
                if formats.architect.is_none() {
                    missing.push("edit_formats.architect".to_string());
                }
            }
        }

        let (Some(vendors), Some(models), Some(RawEditFormats { code: Some(code), architect: Some(architect) })) =
            (self.vendors, self.models, self.edit_formats)
        else {
            return Err(ConfigError::MissingFields(missing));
        };

        if code.is_empty() {
            return Err(ConfigError::EmptyFormats("edit_formats.code".to_string()));
        }
        if architect.is_empty() {
            return Err(ConfigError::EmptyFormats(
                "edit_formats.architect".to_string(),
            ));
        }
        if vendors.is_empty() {
            return Err(ConfigError::MissingFields(vec!["vendors (empty)".to_string()]));
        }

        let without_models: Vec<String> = vendors
            .iter()
            .filter(|v| !models.contains_key(*v))
            .cloned()
            .collect();
        if !without_models.is_empty() {
            return Err(ConfigError::VendorsWithoutModels(without_models));
        }

        let empty_lists: Vec<String> = vendors
            .iter()
            .filter(|v| models.get(*v).map_or(true, Vec::is_empty))
            .cloned()
            .collect();
        if !empty_lists.is_empty() {
            return Err(ConfigError::EmptyModelLists(empty_lists));
        }

        Ok(LauncherConfig {
            vendors,
            models,
            edit_formats: EditFormats { code, architect },
            tool: self.tool,
            logging: self.logging,
            vendor_overrides: self.vendor_overrides,
        })
    }
}
