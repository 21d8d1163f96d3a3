//! aider-launch: interactive launcher for the aider coding assistant
//!
//! Resolves vendor API keys from the environment and a keys file, walks the
//! operator through mode, vendor, model and edit format menus, and runs
//! `aider` with the assembled arguments.

pub mod cli;
pub mod command;
pub mod config;
pub mod credentials;
pub mod error;
pub mod launch;
pub mod logging;
pub mod selection;
pub mod status;
pub mod vendor;
pub mod wizard;
