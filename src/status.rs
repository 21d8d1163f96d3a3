//! Status report: configured vendors and where their credentials come from.

use crate::config::LauncherConfig;
use crate::credentials::{CredentialMap, CredentialSource};
use crate::vendor::VendorRegistry;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct VendorStatus {
    pub vendor: String,
    pub source: String,
    /// Variable the credential was found under; never its value.
    pub variable: Option<String>,
    pub models: usize,
    pub cli_flag: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub program: String,
    pub keys_file: Option<PathBuf>,
    pub vendors: Vec<VendorStatus>,
}

impl StatusReport {
    pub fn collect(
        config: &LauncherConfig,
        registry: &VendorRegistry,
        credentials: &CredentialMap,
    ) -> Self {
        let vendors = config
            .vendors
            .iter()
            .map(|vendor| {
                let credential = credentials.get(vendor);
                VendorStatus {
                    vendor: vendor.clone(),
                    source: credentials.source(vendor).to_string(),
                    variable: credential
                        .filter(|c| c.source != CredentialSource::Unset)
                        .and_then(|c| c.variable.clone()),
                    models: config.models_for(vendor).len(),
                    cli_flag: registry
                        .get(vendor)
                        .and_then(|d| d.cli_flag.as_ref())
                        .map(|f| f.name.clone()),
                }
            })
            .collect();
        Self {
            program: config.tool.program.clone(),
            keys_file: credentials.keys_file().map(|p| p.to_path_buf()),
            vendors,
        }
    }

    pub fn available(&self) -> usize {
        self.vendors.iter().filter(|v| v.variable.is_some()).count()
    }
}
