//! Command builder for the external tool.
//!
//! Turns a completed [`Selection`] into the ordered argument list. Pure: no
//! I/O, no environment access. Credential values come from the resolved
//! [`CredentialMap`] and are only emitted for file-sourced keys; keys found in
//! the environment are inherited by the child process instead.

use crate::credentials::{CredentialMap, CredentialSource};
use crate::selection::{EditorChoice, FormatChoice, Mode, Selection};
use crate::vendor::VendorRegistry;
use tracing::debug;

/// Default program name of the external tool.
pub const DEFAULT_PROGRAM: &str = "aider";

const REDACTED: &str = "****";

/// One argument token; secret tokens are masked when rendered for display.
#[derive(Clone, PartialEq, Eq)]
pub struct Arg {
    value: String,
    secret: bool,
}

impl Arg {
    fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            secret: false,
        }
    }

    fn secret(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            secret: true,
        }
    }
}

impl std::fmt::Debug for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.secret {
            write!(f, "{:?}", REDACTED)
        } else {
            write!(f, "{:?}", self.value)
        }
    }
}

/// Program plus ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<Arg>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    fn push(&mut self, arg: Arg) {
        self.args.push(arg);
    }

    /// Copy of this command with `--edit-format` appended for an explicit format.
    pub fn with_format(&self, format: &FormatChoice) -> CommandLine {
        let mut cmd = self.clone();
        if let FormatChoice::Explicit(name) = format {
            cmd.push(Arg::plain("--edit-format"));
            cmd.push(Arg::plain(name.clone()));
        }
        cmd
    }

    /// Argument values only, unmasked, as passed to the process.
    pub fn arg_values(&self) -> Vec<String> {
        self.args.iter().map(|a| a.value.clone()).collect()
    }

    /// Full token list starting with the program name.
    pub fn tokens(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().map(|a| a.value.clone()))
            .collect()
    }

    /// Shell-quoted tokens for display; secrets masked when `redact` is set.
    pub fn render_tokens(&self, redact: bool) -> Vec<String> {
        std::iter::once(quote(&self.program))
            .chain(self.args.iter().map(|a| {
                if redact && a.secret {
                    REDACTED.to_string()
                } else {
                    quote(&a.value)
                }
            }))
            .collect()
    }

    /// Shell-quoted single line for display.
    pub fn render(&self, redact: bool) -> String {
        self.render_tokens(redact).join(" ")
    }
}

fn quote(token: &str) -> String {
    shlex::try_quote(token)
        .map(|q| q.into_owned())
        .unwrap_or_else(|_| format!("{:?}", token))
}

/// Builds [`CommandLine`]s for one session.
pub struct CommandBuilder<'a> {
    program: String,
    registry: &'a VendorRegistry,
    credentials: &'a CredentialMap,
}

impl<'a> CommandBuilder<'a> {
    pub fn new(registry: &'a VendorRegistry, credentials: &'a CredentialMap) -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            registry,
            credentials,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Model, credential and mode arguments; no edit format.
    pub fn build_base(&self, selection: &Selection) -> CommandLine {
        let mut cmd = CommandLine::new(self.program.clone());
        cmd.push(Arg::plain("--model"));
        cmd.push(Arg::plain(selection.main_model.clone()));
        self.push_credential_flag(&mut cmd, &selection.main_vendor);

        match selection.mode {
            Mode::Architect => {
                cmd.push(Arg::plain("--architect"));
                if let EditorChoice::Explicit { vendor, model } = &selection.editor {
                    cmd.push(Arg::plain("--editor-model"));
                    cmd.push(Arg::plain(model.clone()));
                    if vendor != &selection.main_vendor {
                        self.push_credential_flag(&mut cmd, vendor);
                    }
                }
            }
            Mode::Code => {
                cmd.push(Arg::plain("--chat-mode"));
                cmd.push(Arg::plain("code"));
            }
        }
        cmd
    }

    /// Base command plus the selection's edit format.
    pub fn build(&self, selection: &Selection) -> CommandLine {
        self.build_base(selection).with_format(&selection.format)
    }

    fn push_credential_flag(&self, cmd: &mut CommandLine, vendor: &str) {
        let Some(credential) = self.credentials.get(vendor) else {
            return;
        };
        if credential.source != CredentialSource::File {
            return;
        }
        let Some(value) = credential.value.as_ref() else {
            return;
        };
        let Some(flag) = self.registry.get(vendor).and_then(|d| d.cli_flag.as_ref()) else {
            debug!(vendor, "No credential flag mapping; relying on inherited environment");
            return;
        };
        cmd.push(Arg::plain(flag.name.clone()));
        cmd.push(Arg::secret(flag.encoding.encode(value.expose_secret())));
    }
}
