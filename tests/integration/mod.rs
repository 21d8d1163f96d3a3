//! Integration tests for aider-launch

mod cli_status;
mod config_loading;
mod test_utils;
mod wizard_session;
