//! Terminal access for the wizard.

use owo_colors::OwoColorize;
use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

/// Line-oriented terminal used by the wizard.
pub trait Console {
    fn line(&mut self, text: &str);

    fn heading(&mut self, text: &str) {
        self.line(text);
    }

    fn error(&mut self, text: &str) {
        self.line(text);
    }

    /// Read one line. `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Columns available for wrapped output.
    fn width(&self) -> usize {
        super::screen::SCREEN_WIDTH
    }
}

/// Console on the process's stdin/stdout.
///
/// Uses dialoguer line editing when attached to a terminal and plain buffered
/// reads otherwise, so piped input works.
pub struct TerminalConsole {
    term: console::Term,
    interactive: bool,
    colors: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        let term = console::Term::stdout();
        let interactive = term.is_term() && io::stdin().is_terminal();
        Self {
            term,
            interactive,
            colors: console::colors_enabled(),
        }
    }

    fn read_plain(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;
        let mut buf = String::new();
        if io::stdin().lock().read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn line(&mut self, text: &str) {
        println!("{}", text);
    }

    fn heading(&mut self, text: &str) {
        if self.colors {
            println!("{}", text.bold());
        } else {
            println!("{}", text);
        }
    }

    fn error(&mut self, text: &str) {
        if self.colors {
            println!("{}", text.red());
        } else {
            println!("{}", text);
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if !self.interactive {
            return self.read_plain(prompt);
        }
        let result = dialoguer::Input::<String>::new()
            .with_prompt(prompt.trim_end().trim_end_matches(':'))
            .allow_empty(true)
            .report(false)
            .interact_text_on(&self.term);
        match result {
            Ok(line) => Ok(Some(line)),
            Err(dialoguer::Error::IO(e))
                if matches!(
                    e.kind(),
                    io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted
                ) =>
            {
                Ok(None)
            }
            Err(dialoguer::Error::IO(e)) => Err(e),
        }
    }

    fn width(&self) -> usize {
        let (_, cols) = self.term.size();
        (cols as usize).min(super::screen::SCREEN_WIDTH)
    }
}

/// Console fed from a fixed list of input lines; records everything shown.
///
/// Runs out of input like a closed stdin.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    output: Vec<String>,
    prompts: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            output: Vec::new(),
            prompts: Vec::new(),
        }
    }

    /// Everything shown so far, one entry per line.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Input lines not consumed yet.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn line(&mut self, text: &str) {
        self.output.extend(text.lines().map(str::to_string));
        if text.is_empty() {
            self.output.push(String::new());
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.inputs.pop_front())
    }
}
