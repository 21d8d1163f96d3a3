//! Credential resolver: environment first, then the keys file.

use super::keys_file::{locate_keys_file, parse_keys_file, KEYS_FILE_ENV};
use super::{Credential, CredentialMap, CredentialSource, Environment, KeysFileSearch};
use crate::vendor::VendorRegistry;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Resolves credentials for every configured vendor.
pub struct CredentialResolver<'a> {
    registry: &'a VendorRegistry,
    home: Option<PathBuf>,
    keys_file_override: Option<PathBuf>,
}

impl<'a> CredentialResolver<'a> {
    pub fn new(registry: &'a VendorRegistry) -> Self {
        Self {
            registry,
            home: directories::BaseDirs::new().map(|b| b.home_dir().to_path_buf()),
            keys_file_override: None,
        }
    }

    /// Home directory used for the default keys file.
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    /// Explicit keys file, taking the place of `$PRIMARY_KEYS_FILE`.
    pub fn with_keys_file(mut self, path: Option<PathBuf>) -> Self {
        self.keys_file_override = path;
        self
    }

    /// Resolve all vendors. Normalized and file-loaded keys are written to `env`.
    pub fn resolve(&self, env: &mut dyn Environment) -> CredentialMap {
        let override_path = self
            .keys_file_override
            .as_ref()
            .map(|p| p.display().to_string())
            .or_else(|| env.get(KEYS_FILE_ENV));
        let default_path = self
            .home
            .as_ref()
            .map(|h| h.join(super::DEFAULT_KEYS_FILE_NAME));

        let mut map = CredentialMap::new(KeysFileSearch {
            override_path: override_path.clone(),
            default_path,
            used: None,
        });

        self.resolve_from_environment(env, &mut map);

        let keys_file = locate_keys_file(override_path.as_deref(), self.home.as_deref());
        if let Some(path) = keys_file {
            match std::fs::read_to_string(&path) {
                Ok(content) => {
                    info!(path = %path.display(), "Loading API keys from file");
                    self.resolve_from_file(&content, env, &mut map);
                    map.search.used = Some(path);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Could not read API keys file");
                }
            }
        } else {
            debug!("No API keys file found");
        }

        for (vendor, credential) in map.iter() {
            info!(vendor, source = %credential.source, "Resolved API key source");
        }
        map
    }

    fn resolve_from_environment(&self, env: &mut dyn Environment, map: &mut CredentialMap) {
        for descriptor in self.registry.iter() {
            let found = descriptor
                .credential_names
                .iter()
                .find_map(|name| env.get(name).map(|value| (name.clone(), value)));

            let credential = match found {
                Some((name, value)) => {
                    let preferred = descriptor.preferred_name();
                    if name != preferred && env.get(preferred).is_none() {
                        env.set(preferred, &value);
                        info!(
                            vendor = %descriptor.name,
                            from = %name,
                            to = %preferred,
                            "Copied legacy API key variable to preferred name"
                        );
                    }
                    debug!(vendor = %descriptor.name, variable = %name, "API key found in environment");
                    Credential::from_environment(&name, &value)
                }
                None => Credential::unset(),
            };
            map.insert(
                &descriptor.name,
                descriptor.credential_names.clone(),
                credential,
            );
        }
    }

    fn resolve_from_file(&self, content: &str, env: &mut dyn Environment, map: &mut CredentialMap) {
        let mut loaded: Vec<&str> = Vec::new();
        for assignment in parse_keys_file(content) {
            let Some(owner) = self.registry.owner_of(&assignment.name) else {
                debug!(line = assignment.line, "Skipping unrecognized keys file variable");
                continue;
            };
            if assignment.value.is_empty() {
                debug!(line = assignment.line, variable = %assignment.name, "Skipping empty API key");
                continue;
            }
            if env.get(&assignment.name).is_none() {
                env.set(&assignment.name, &assignment.value);
            }
            if map.source(&owner.name) == CredentialSource::Unset
                && !loaded.contains(&owner.name.as_str())
            {
                loaded.push(&owner.name);
            }
        }

        // Reported variable is the most preferred name present once the whole file is read.
        for vendor in loaded {
            let Some(descriptor) = self.registry.get(vendor) else {
                continue;
            };
            let reported = descriptor
                .credential_names
                .iter()
                .find_map(|name| env.get(name).map(|value| (name.clone(), value)));
            if let (Some((name, value)), Some(slot)) = (reported, map.get_mut(vendor)) {
                *slot = Credential::from_file(&name, &value);
            }
        }
    }
}
