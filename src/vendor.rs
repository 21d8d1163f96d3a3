//! Vendor descriptor table.
//!
//! Each vendor maps to an ordered list of credential variable names (first is
//! preferred) and, optionally, the command-line flag the external tool accepts
//! for that vendor's key. Adding a vendor is a data change here or in the
//! `vendor_overrides` configuration table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a credential value is written after its flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueEncoding {
    /// `<flag> <value>`
    Raw,
    /// `<flag> <prefix>=<value>`
    Composite { prefix: String },
}

impl ValueEncoding {
    pub fn encode(&self, value: &str) -> String {
        match self {
            ValueEncoding::Raw => value.to_string(),
            ValueEncoding::Composite { prefix } => format!("{}={}", prefix, value),
        }
    }
}

/// Flag name plus value encoding for one vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliFlag {
    pub name: String,
    pub encoding: ValueEncoding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorDescriptor {
    pub name: String,
    /// Credential variable names in preference order; never empty.
    pub credential_names: Vec<String>,
    pub cli_flag: Option<CliFlag>,
}

impl VendorDescriptor {
    /// Descriptor for a vendor with no special handling: `<VENDOR>_API_KEY`, no flag.
    pub fn generic(name: &str) -> Self {
        Self {
            name: name.to_string(),
            credential_names: vec![format!("{}_API_KEY", name)],
            cli_flag: None,
        }
    }

    pub fn preferred_name(&self) -> &str {
        &self.credential_names[0]
    }

    pub fn accepts(&self, variable: &str) -> bool {
        self.credential_names.iter().any(|n| n == variable)
    }
}

/// Vendor override entry as it appears in configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorOverride {
    #[serde(default)]
    pub credential_names: Vec<String>,
    #[serde(default)]
    pub cli_flag: Option<String>,
    /// Composite encoding prefix; raw encoding when absent.
    #[serde(default)]
    pub prefix: Option<String>,
}

fn raw(name: &str, var: &str, flag: &str) -> VendorDescriptor {
    VendorDescriptor {
        name: name.to_string(),
        credential_names: vec![var.to_string()],
        cli_flag: Some(CliFlag {
            name: flag.to_string(),
            encoding: ValueEncoding::Raw,
        }),
    }
}

fn builtin(name: &str) -> Option<VendorDescriptor> {
    match name {
        "OPENAI" => Some(raw("OPENAI", "OPENAI_API_KEY", "--openai-api-key")),
        "ANTHROPIC" => Some(raw("ANTHROPIC", "ANTHROPIC_API_KEY", "--anthropic-api-key")),
        "DEEPSEEK" => Some(raw("DEEPSEEK", "DEEPSEEK_API_KEY", "--deepseek-api-key")),
        "GOOGLE" => Some(VendorDescriptor {
            name: "GOOGLE".to_string(),
            credential_names: vec!["GEMINI_API_KEY".to_string(), "GOOGLE_API_KEY".to_string()],
            cli_flag: Some(CliFlag {
                name: "--api-key".to_string(),
                encoding: ValueEncoding::Composite {
                    prefix: "google".to_string(),
                },
            }),
        }),
        _ => None,
    }
}

/// Ordered set of descriptors for the configured vendors.
#[derive(Debug, Clone, Default)]
pub struct VendorRegistry {
    descriptors: Vec<VendorDescriptor>,
}

impl VendorRegistry {
    /// Build descriptors for `vendors` in order, applying overrides over the built-in table.
    pub fn from_vendors(vendors: &[String], overrides: &HashMap<String, VendorOverride>) -> Self {
        let descriptors = vendors
            .iter()
            .map(|name| {
                let mut descriptor =
                    builtin(name).unwrap_or_else(|| VendorDescriptor::generic(name));
                if let Some(ov) = overrides.get(name) {
                    apply_override(&mut descriptor, ov);
                }
                descriptor
            })
            .collect();
        Self { descriptors }
    }

    pub fn get(&self, vendor: &str) -> Option<&VendorDescriptor> {
        self.descriptors.iter().find(|d| d.name == vendor)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VendorDescriptor> {
        self.descriptors.iter()
    }

    /// Vendor that owns `variable`, if any.
    pub fn owner_of(&self, variable: &str) -> Option<&VendorDescriptor> {
        self.descriptors.iter().find(|d| d.accepts(variable))
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

fn apply_override(descriptor: &mut VendorDescriptor, ov: &VendorOverride) {
    let names: Vec<String> = ov
        .credential_names
        .iter()
        .filter(|n| !n.trim().is_empty())
        .cloned()
        .collect();
    if !names.is_empty() {
        descriptor.credential_names = names;
    }
    if let Some(flag) = &ov.cli_flag {
        let encoding = match &ov.prefix {
            Some(prefix) => ValueEncoding::Composite {
                prefix: prefix.clone(),
            },
            None => ValueEncoding::Raw,
        };
        descriptor.cli_flag = Some(CliFlag {
            name: flag.clone(),
            encoding,
        });
    }
}
