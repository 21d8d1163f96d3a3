//! Interactive selection wizard.
//!
//! A small state machine walks the operator from mode to vendor, model,
//! optional editor and edit format, then confirms and launches the tool.
//! Menu parsing lives in [`step`], screen layout in [`screen`], terminal
//! access behind the [`Console`] trait.

pub mod console;
pub mod screen;
pub mod session;
pub mod step;

pub use console::{Console, ScriptedConsole, TerminalConsole};
pub use session::{SessionReport, Wizard};
pub use step::{EditorPick, LaunchAction, StepOutcome};
