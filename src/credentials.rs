//! Credential resolution
//!
//! API keys are looked up once per session: first in the process environment,
//! then in a keys file. The result is a [`CredentialMap`] recording, for every
//! configured vendor, where its key came from. The map is read-only afterwards.

use crate::error::CredentialError;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

pub mod keys_file;
pub mod resolver;

pub use keys_file::{parse_keys_file, KeyAssignment, DEFAULT_KEYS_FILE_NAME, KEYS_FILE_ENV};
pub use resolver::CredentialResolver;

/// An API key value. `Debug` never prints the secret.
#[derive(Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(SecretString::from(key.into()))
    }

    /// Expose the key. Only the command builder needs this.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey([REDACTED])")
    }
}

impl From<&str> for ApiKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Where a vendor's key was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialSource {
    Environment,
    File,
    Unset,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CredentialSource::Environment => "env",
            CredentialSource::File => "file",
            CredentialSource::Unset => "unset",
        };
        f.write_str(s)
    }
}

/// Resolved credential for one vendor.
#[derive(Debug, Clone)]
pub struct Credential {
    pub source: CredentialSource,
    /// Variable name the key was read from.
    pub variable: Option<String>,
    pub value: Option<ApiKey>,
}

impl Credential {
    pub fn unset() -> Self {
        Self {
            source: CredentialSource::Unset,
            variable: None,
            value: None,
        }
    }

    pub fn from_environment(variable: &str, value: &str) -> Self {
        Self {
            source: CredentialSource::Environment,
            variable: Some(variable.to_string()),
            value: Some(ApiKey::new(value)),
        }
    }

    pub fn from_file(variable: &str, value: &str) -> Self {
        Self {
            source: CredentialSource::File,
            variable: Some(variable.to_string()),
            value: Some(ApiKey::new(value)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.source != CredentialSource::Unset
    }
}

/// Where the keys file was searched for; used in remediation messages.
#[derive(Debug, Clone, Default)]
pub struct KeysFileSearch {
    /// Raw override path, if one was given.
    pub override_path: Option<String>,
    /// The default `$HOME/.llm_api_keys` path, if a home directory is known.
    pub default_path: Option<PathBuf>,
    /// The file that was actually read.
    pub used: Option<PathBuf>,
}

#[derive(Debug, Clone)]
struct Entry {
    vendor: String,
    candidates: Vec<String>,
    credential: Credential,
}

/// Session-wide vendor → credential mapping, in configured vendor order.
#[derive(Debug, Clone, Default)]
pub struct CredentialMap {
    entries: Vec<Entry>,
    search: KeysFileSearch,
}

impl CredentialMap {
    pub fn new(search: KeysFileSearch) -> Self {
        Self {
            entries: Vec::new(),
            search,
        }
    }

    /// Insert or replace the credential for `vendor`.
    pub fn insert(&mut self, vendor: &str, candidates: Vec<String>, credential: Credential) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.vendor == vendor) {
            entry.candidates = candidates;
            entry.credential = credential;
        } else {
            self.entries.push(Entry {
                vendor: vendor.to_string(),
                candidates,
                credential,
            });
        }
    }

    pub fn get(&self, vendor: &str) -> Option<&Credential> {
        self.entries
            .iter()
            .find(|e| e.vendor == vendor)
            .map(|e| &e.credential)
    }

    pub(crate) fn get_mut(&mut self, vendor: &str) -> Option<&mut Credential> {
        self.entries
            .iter_mut()
            .find(|e| e.vendor == vendor)
            .map(|e| &mut e.credential)
    }

    /// Source for `vendor`; unknown vendors are `Unset`.
    pub fn source(&self, vendor: &str) -> CredentialSource {
        self.get(vendor)
            .map(|c| c.source)
            .unwrap_or(CredentialSource::Unset)
    }

    /// Vendors with an active credential, in configured order.
    pub fn available_vendors(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.credential.is_active())
            .map(|e| e.vendor.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Credential)> {
        self.entries
            .iter()
            .map(|e| (e.vendor.as_str(), &e.credential))
    }

    pub fn keys_file(&self) -> Option<&Path> {
        self.search.used.as_deref()
    }

    /// Fails when `vendor` has no credential from any source.
    pub fn check_available(&self, vendor: &str) -> Result<(), CredentialError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.vendor == vendor)
            .ok_or_else(|| CredentialError::UnknownVendor(vendor.to_string()))?;
        if entry.credential.is_active() {
            return Ok(());
        }

        let mut checked: Vec<String> = entry
            .candidates
            .iter()
            .map(|name| format!("Environment Variable: {}", name))
            .collect();
        match &self.search.override_path {
            Some(path) => checked.push(format!(
                "Primary Keys File (env): ${} -> {}",
                KEYS_FILE_ENV, path
            )),
            None => checked.push(format!(
                "Primary Keys File (env): ${} (not set)",
                KEYS_FILE_ENV
            )),
        }
        match &self.search.default_path {
            Some(path) => checked.push(format!(
                "Secondary Keys File (default): {}",
                path.display()
            )),
            None => checked.push(format!(
                "Secondary Keys File (default): ~/{} (no home directory)",
                DEFAULT_KEYS_FILE_NAME
            )),
        }
        Err(CredentialError::Missing {
            vendor: vendor.to_string(),
            checked,
        })
    }
}

/// Access to environment variables. The resolver writes normalized and
/// file-loaded keys back through this trait so the launched tool inherits them.
pub trait Environment {
    /// Value of `name`; empty values count as absent.
    fn get(&self, name: &str) -> Option<String>;
    fn set(&mut self, name: &str, value: &str);
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }

    fn set(&mut self, name: &str, value: &str) {
        std::env::set_var(name, value);
    }
}

/// In-memory environment, used by tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryEnvironment {
    vars: HashMap<String, String>,
}

impl MemoryEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl Environment for MemoryEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).filter(|v| !v.is_empty()).cloned()
    }

    fn set(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }
}
