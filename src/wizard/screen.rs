//! Menu titles and screen layout.

use super::console::Console;
use crate::selection::{Mode, Role};

/// Screen width the titles are centered in.
pub const SCREEN_WIDTH: usize = 80;

/// Which screen a title belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleKey {
    ModeSelect,
    Vendor(Role),
    Model(Role),
    Format(Mode),
    Launch(Mode),
}

const TITLES: &[(TitleKey, &str)] = &[
    (TitleKey::ModeSelect, "SELECT AIDER OPERATING MODE"),
    (TitleKey::Vendor(Role::Code), "SELECT CODE MODE VENDOR"),
    (TitleKey::Model(Role::Code), "SELECT CODE MODE MODEL"),
    (TitleKey::Vendor(Role::Architect), "SELECT ARCHITECT MODE VENDOR"),
    (TitleKey::Model(Role::Architect), "SELECT ARCHITECT MODE MODEL"),
    (TitleKey::Vendor(Role::Editor), "SELECT EDITOR VENDOR"),
    (TitleKey::Model(Role::Editor), "SELECT EDITOR MODEL"),
    (TitleKey::Format(Mode::Code), "SELECT CODE MODE EDIT FORMAT"),
    (TitleKey::Format(Mode::Architect), "SELECT ARCHITECT EDIT FORMAT"),
    (TitleKey::Launch(Mode::Code), "LAUNCHING AIDER: CODE MODE"),
    (TitleKey::Launch(Mode::Architect), "LAUNCHING AIDER: ARCHITECT MODE"),
];

pub fn title(key: TitleKey) -> &'static str {
    TITLES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, t)| *t)
        .unwrap_or("SELECT")
}

pub fn separator_main() -> String {
    "=".repeat(SCREEN_WIDTH)
}

pub fn separator_sub() -> String {
    "-".repeat(SCREEN_WIDTH)
}

pub fn centered(text: &str) -> String {
    format!("{:^width$}", text, width = SCREEN_WIDTH)
}

/// Blank line, separator, centered title, separator.
pub fn show_header(console: &mut dyn Console, key: TitleKey) {
    console.line("");
    console.line(&separator_main());
    console.heading(&centered(title(key)));
    console.line(&separator_main());
}

/// Numbered list starting at 1.
pub fn show_items<S: AsRef<str>>(console: &mut dyn Console, items: &[S]) {
    for (i, item) in items.iter().enumerate() {
        console.line(&format!("{}. {}", i + 1, item.as_ref()));
    }
}

/// Wrap tokens to `width` columns; continuation lines are indented two spaces.
pub fn wrap_tokens(tokens: &[String], width: usize) -> String {
    let width = width.max(20);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for token in tokens {
        let indent = if lines.is_empty() { "" } else { "  " };
        if current.is_empty() {
            current = format!("{}{}", indent, token);
        } else if console::measure_text_width(&current) + 1 + console::measure_text_width(token)
            <= width
        {
            current.push(' ');
            current.push_str(token);
        } else {
            lines.push(std::mem::take(&mut current));
            current = format!("  {}", token);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}
