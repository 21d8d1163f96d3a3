//! CLI presentation: text and json formatters per command family.

mod status;

pub use status::{format_status_json, format_status_text};
