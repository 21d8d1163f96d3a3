//! Input parsing for the wizard's menu steps.
//!
//! Every function here is pure: it takes the raw line the operator typed and
//! the menu it was typed at, and says what the wizard should do next.

use crate::error::InputError;
use crate::selection::{FormatChoice, Mode};

/// Editor vendor menu key that reuses the main vendor and model.
pub const REUSE_MAIN_KEY: &str = "9";

/// Outcome of one menu step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome<T> {
    /// Empty input or `0`.
    Back,
    Invalid(InputError),
    Chosen(T),
}

impl<T> StepOutcome<T> {
    pub fn map_chosen<U>(self, f: impl FnOnce(T) -> U) -> StepOutcome<U> {
        match self {
            StepOutcome::Chosen(v) => StepOutcome::Chosen(f(v)),
            StepOutcome::Back => StepOutcome::Back,
            StepOutcome::Invalid(e) => StepOutcome::Invalid(e),
        }
    }
}

/// Choice at the editor vendor step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorPick {
    Vendor(String),
    ReuseMain,
}

/// Choice at the launch confirmation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchAction {
    Launch,
    ChangeFormat,
    MainMenu,
}

/// Parse a numbered-menu choice into a zero-based index.
pub fn parse_index(input: &str, count: usize) -> StepOutcome<usize> {
    let input = input.trim();
    if input.is_empty() || input == "0" {
        return StepOutcome::Back;
    }
    match parse_number(input) {
        Some(n) if (1..=count).contains(&n) => StepOutcome::Chosen(n - 1),
        Some(n) => StepOutcome::Invalid(InputError::OutOfRange {
            choice: n,
            max: count,
        }),
        None => StepOutcome::Invalid(InputError::NotANumber(input.to_string())),
    }
}

/// Plain ASCII digits only; signs and other decorations are rejected.
fn parse_number(input: &str) -> Option<usize> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}

/// Pick an item from `items` by its 1-based menu number.
pub fn pick<T: Clone>(input: &str, items: &[T]) -> StepOutcome<T> {
    parse_index(input, items.len()).map_chosen(|i| items[i].clone())
}

/// Editor vendor step: `9` is checked before the numbered vendors, so a
/// ninth vendor is never reachable from this menu.
pub fn pick_editor_vendor(input: &str, vendors: &[String]) -> StepOutcome<EditorPick> {
    if input.trim() == REUSE_MAIN_KEY {
        return StepOutcome::Chosen(EditorPick::ReuseMain);
    }
    pick(input, vendors).map_chosen(EditorPick::Vendor)
}

/// Format step: item 1 is the tool default, then the configured formats.
pub fn pick_format(input: &str, formats: &[String]) -> StepOutcome<FormatChoice> {
    parse_index(input, formats.len() + 1).map_chosen(|i| match i {
        0 => FormatChoice::ToolDefault,
        i => FormatChoice::Explicit(formats[i - 1].clone()),
    })
}

/// Mode menu: `Back` means exit.
pub fn pick_mode(input: &str) -> StepOutcome<Mode> {
    pick(input, &[Mode::Code, Mode::Architect])
}

/// Launch menu. Unlike the other menus, empty input launches.
pub fn pick_launch_action(input: &str) -> StepOutcome<LaunchAction> {
    match input.trim() {
        "" | "1" => StepOutcome::Chosen(LaunchAction::Launch),
        "2" => StepOutcome::Chosen(LaunchAction::ChangeFormat),
        "0" => StepOutcome::Chosen(LaunchAction::MainMenu),
        other => match parse_number(other) {
            Some(n) => StepOutcome::Invalid(InputError::OutOfRange { choice: n, max: 2 }),
            None => StepOutcome::Invalid(InputError::NotANumber(other.to_string())),
        },
    }
}
