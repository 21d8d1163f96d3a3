//! Selection data: what the operator picked in one wizard run.

use std::fmt;

/// Operating mode of the external tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Code,
    Architect,
}

impl Mode {
    /// Role label of the main model in this mode.
    pub fn main_role(self) -> Role {
        match self {
            Mode::Code => Role::Code,
            Mode::Architect => Role::Architect,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Code => f.write_str("code"),
            Mode::Architect => f.write_str("architect"),
        }
    }
}

/// Which model a vendor or model step is choosing for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Code,
    Architect,
    Editor,
}

/// Editor model choice in architect mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorChoice {
    /// Reuse the main vendor and model; the tool picks its default editor.
    UseMain,
    Explicit { vendor: String, model: String },
}

/// Edit format choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatChoice {
    ToolDefault,
    Explicit(String),
}

impl fmt::Display for FormatChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatChoice::ToolDefault => f.write_str("Default (aider chooses)"),
            FormatChoice::Explicit(name) => f.write_str(name),
        }
    }
}

/// A completed selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub mode: Mode,
    pub main_vendor: String,
    pub main_model: String,
    /// Always `UseMain` in code mode.
    pub editor: EditorChoice,
    pub format: FormatChoice,
}

impl Selection {
    pub fn code(vendor: &str, model: &str) -> Self {
        Self {
            mode: Mode::Code,
            main_vendor: vendor.to_string(),
            main_model: model.to_string(),
            editor: EditorChoice::UseMain,
            format: FormatChoice::ToolDefault,
        }
    }

    pub fn architect(vendor: &str, model: &str, editor: EditorChoice) -> Self {
        Self {
            mode: Mode::Architect,
            main_vendor: vendor.to_string(),
            main_model: model.to_string(),
            editor,
            format: FormatChoice::ToolDefault,
        }
    }

    pub fn with_format(mut self, format: FormatChoice) -> Self {
        self.format = format;
        self
    }
}
