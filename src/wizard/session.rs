//! The selection state machine and the outer session loop.

use super::console::Console;
use super::screen::{self, TitleKey};
use super::step::{self, EditorPick, LaunchAction, StepOutcome};
use crate::command::{CommandBuilder, CommandLine};
use crate::config::LauncherConfig;
use crate::credentials::CredentialMap;
use crate::error::LaunchError;
use crate::launch::{read_tool_config_preview, CommandExecutor};
use crate::selection::{EditorChoice, FormatChoice, Mode, Role, Selection};
use crate::vendor::VendorRegistry;
use std::io;
use tracing::{debug, info, warn};

const INVALID_CHOICE: &str = "Invalid choice. Please try again.";

/// What happened over a whole session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    /// Launch attempts, successful or not.
    pub launches: usize,
    pub failed_launches: usize,
    pub last_launch_failed: bool,
    /// Input ended (EOF) instead of an explicit exit.
    pub end_of_input: bool,
}

impl SessionReport {
    /// Process exit code: 1 when the last launch attempt failed.
    pub fn exit_code(&self) -> i32 {
        if self.last_launch_failed {
            1
        } else {
            0
        }
    }

    fn record(&mut self, flow: Flow) {
        match flow {
            Flow::Launched => {
                self.launches += 1;
                self.last_launch_failed = false;
            }
            Flow::LaunchFailed => {
                self.launches += 1;
                self.failed_launches += 1;
                self.last_launch_failed = true;
            }
            Flow::EndOfInput => self.end_of_input = true,
            Flow::MainMenu => {}
        }
    }
}

/// How one wizard pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    MainMenu,
    Launched,
    LaunchFailed,
    EndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Vendor(Role),
    Model(Role),
    Format,
    Launch,
}

/// Partial selection for one wizard pass; dropped when the pass ends.
#[derive(Debug)]
struct Draft {
    mode: Mode,
    main_vendor: Option<String>,
    main_model: Option<String>,
    editor_vendor: Option<String>,
    editor: EditorChoice,
    format: FormatChoice,
}

impl Draft {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            main_vendor: None,
            main_model: None,
            editor_vendor: None,
            editor: EditorChoice::UseMain,
            format: FormatChoice::ToolDefault,
        }
    }

    fn vendor_for(&self, role: Role) -> Option<&str> {
        match role {
            Role::Editor => self.editor_vendor.as_deref(),
            _ => self.main_vendor.as_deref(),
        }
    }

    fn selection(&self) -> Option<Selection> {
        let vendor = self.main_vendor.as_deref()?;
        let model = self.main_model.as_deref()?;
        let selection = match self.mode {
            Mode::Code => Selection::code(vendor, model),
            Mode::Architect => Selection::architect(vendor, model, self.editor.clone()),
        };
        Some(selection.with_format(self.format.clone()))
    }
}

enum Next {
    Go(Step),
    End(Flow),
}

enum Input {
    Line(String),
    Closed,
}

/// Interactive launcher session.
pub struct Wizard<'a> {
    config: &'a LauncherConfig,
    credentials: &'a CredentialMap,
    builder: CommandBuilder<'a>,
    executor: &'a dyn CommandExecutor,
}

impl<'a> Wizard<'a> {
    pub fn new(
        config: &'a LauncherConfig,
        registry: &'a VendorRegistry,
        credentials: &'a CredentialMap,
        executor: &'a dyn CommandExecutor,
    ) -> Self {
        Self {
            config,
            credentials,
            builder: CommandBuilder::new(registry, credentials)
                .with_program(config.tool.program.clone()),
            executor,
        }
    }

    /// Run the mode menu until the operator exits or input ends.
    pub fn run(&self, console: &mut dyn Console) -> io::Result<SessionReport> {
        let mut report = SessionReport::default();
        loop {
            screen::show_header(console, TitleKey::ModeSelect);
            console.line("1. Code Mode");
            console.line("2. Architect Mode");
            console.line("0. Exit");
            let Input::Line(line) = read(console, "Enter your choice [1-2, Enter=0]: ")? else {
                report.record(Flow::EndOfInput);
                break;
            };
            match step::pick_mode(&line) {
                StepOutcome::Back => break,
                StepOutcome::Invalid(e) => {
                    debug!(error = %e, "Invalid mode choice");
                    console.error(INVALID_CHOICE);
                }
                StepOutcome::Chosen(mode) => {
                    info!(mode = %mode, "Mode selected");
                    let flow = self.run_pass(console, mode)?;
                    report.record(flow);
                    if flow == Flow::EndOfInput {
                        break;
                    }
                }
            }
        }
        console.line("Exiting.");
        info!(
            launches = report.launches,
            failed = report.failed_launches,
            "Session finished"
        );
        Ok(report)
    }

    /// One pass from vendor selection to launch or back to the mode menu.
    fn run_pass(&self, console: &mut dyn Console, mode: Mode) -> io::Result<Flow> {
        let mut draft = Draft::new(mode);
        let mut current = Step::Vendor(mode.main_role());
        loop {
            debug!(step = ?current, "Wizard step");
            let next = match current {
                Step::Vendor(role) => self.vendor_step(console, &mut draft, role)?,
                Step::Model(role) => self.model_step(console, &mut draft, role)?,
                Step::Format => self.format_step(console, &mut draft)?,
                Step::Launch => self.launch_step(console, &draft)?,
            };
            match next {
                Next::Go(step) => current = step,
                Next::End(flow) => return Ok(flow),
            }
        }
    }

    fn vendor_step(
        &self,
        console: &mut dyn Console,
        draft: &mut Draft,
        role: Role,
    ) -> io::Result<Next> {
        let vendors = self.credentials.available_vendors();
        screen::show_header(console, TitleKey::Vendor(role));
        if vendors.is_empty() {
            console.line("No vendors found with loaded API keys.");
            console.line(
                "Please ensure you have set API keys in environment variables or a keys file.",
            );
        } else {
            let labels: Vec<String> = vendors
                .iter()
                .map(|v| format!("{} ({})", v, self.credentials.source(v)))
                .collect();
            screen::show_items(console, &labels);
        }
        let prompt = if role == Role::Editor {
            console.line(&format!(
                "{}. Use same VENDOR and MODEL as Architect",
                step::REUSE_MAIN_KEY
            ));
            console.line("0. Back");
            if vendors.is_empty() {
                "Enter your choice [9, Enter=0]: ".to_string()
            } else {
                format!("Enter your choice [1-{}, 9, Enter=0]: ", vendors.len())
            }
        } else {
            console.line("0. Back");
            menu_prompt(vendors.len())
        };

        let Input::Line(line) = read(console, &prompt)? else {
            return Ok(Next::End(Flow::EndOfInput));
        };

        let outcome = if role == Role::Editor {
            step::pick_editor_vendor(&line, &vendors)
        } else {
            step::pick(&line, &vendors).map_chosen(EditorPick::Vendor)
        };

        let next = match outcome {
            StepOutcome::Back => match role {
                Role::Editor => Step::Model(draft.mode.main_role()),
                _ => return Ok(Next::End(Flow::MainMenu)),
            },
            StepOutcome::Invalid(e) => {
                debug!(error = %e, "Invalid vendor choice");
                console.error(INVALID_CHOICE);
                Step::Vendor(role)
            }
            StepOutcome::Chosen(EditorPick::ReuseMain) => {
                draft.editor_vendor = None;
                draft.editor = EditorChoice::UseMain;
                Step::Format
            }
            StepOutcome::Chosen(EditorPick::Vendor(vendor)) => {
                match self.credentials.check_available(&vendor) {
                    Ok(()) => {
                        info!(vendor = %vendor, role = ?role, "Vendor selected");
                        if role == Role::Editor {
                            draft.editor_vendor = Some(vendor);
                        } else {
                            draft.main_vendor = Some(vendor);
                        }
                        Step::Model(role)
                    }
                    Err(e) => {
                        warn!(vendor = %vendor, "Selected vendor has no credential");
                        console.error(&e.to_string());
                        console.line(&e.remediation());
                        Step::Vendor(role)
                    }
                }
            }
        };
        Ok(Next::Go(next))
    }

    fn model_step(
        &self,
        console: &mut dyn Console,
        draft: &mut Draft,
        role: Role,
    ) -> io::Result<Next> {
        let vendor = draft.vendor_for(role).unwrap_or_default().to_string();
        let models = self.config.models_for(&vendor);
        screen::show_header(console, TitleKey::Model(role));
        console.line(&format!("Vendor: {}", vendor));
        screen::show_items(console, models);
        console.line("0. Back");
        let Input::Line(line) = read(console, &menu_prompt(models.len()))? else {
            return Ok(Next::End(Flow::EndOfInput));
        };
        let next = match step::pick(&line, models) {
            StepOutcome::Back => Step::Vendor(role),
            StepOutcome::Invalid(e) => {
                debug!(error = %e, "Invalid model choice");
                console.error(INVALID_CHOICE);
                Step::Model(role)
            }
            StepOutcome::Chosen(model) => {
                info!(vendor = %vendor, model = %model, role = ?role, "Model selected");
                match role {
                    Role::Editor => {
                        draft.editor = EditorChoice::Explicit { vendor, model };
                        Step::Format
                    }
                    _ => {
                        draft.main_model = Some(model);
                        match draft.mode {
                            Mode::Code => Step::Format,
                            Mode::Architect => Step::Vendor(Role::Editor),
                        }
                    }
                }
            }
        };
        Ok(Next::Go(next))
    }

    fn format_step(&self, console: &mut dyn Console, draft: &mut Draft) -> io::Result<Next> {
        let formats = self.config.edit_formats.for_mode(draft.mode);
        screen::show_header(console, TitleKey::Format(draft.mode));
        let mut labels = vec![FormatChoice::ToolDefault.to_string()];
        labels.extend(formats.iter().cloned());
        screen::show_items(console, &labels);
        console.line("0. Back");
        let Input::Line(line) = read(console, &menu_prompt(labels.len()))? else {
            return Ok(Next::End(Flow::EndOfInput));
        };
        let next = match step::pick_format(&line, formats) {
            StepOutcome::Back => match (draft.mode, &draft.editor) {
                (Mode::Code, _) => Step::Model(Role::Code),
                (Mode::Architect, EditorChoice::UseMain) => Step::Vendor(Role::Editor),
                (Mode::Architect, EditorChoice::Explicit { .. }) => Step::Model(Role::Editor),
            },
            StepOutcome::Invalid(e) => {
                debug!(error = %e, "Invalid format choice");
                console.error(INVALID_CHOICE);
                Step::Format
            }
            StepOutcome::Chosen(format) => {
                info!(format = %format, "Edit format selected");
                draft.format = format;
                Step::Launch
            }
        };
        Ok(Next::Go(next))
    }

    fn launch_step(&self, console: &mut dyn Console, draft: &Draft) -> io::Result<Next> {
        let Some(selection) = draft.selection() else {
            return Ok(Next::Go(Step::Vendor(draft.mode.main_role())));
        };
        let program = self.config.tool.program.as_str();
        if let Err(e) = self.executor.locate(program) {
            warn!(program, "External tool not found");
            console.error(&e.to_string());
            pause(console)?;
            return Ok(Next::End(Flow::LaunchFailed));
        }

        let command = self.builder.build_base(&selection).with_format(&selection.format);
        loop {
            self.show_launch_screen(console, &selection, &command);
            console.line("1. Launch (Enter default)");
            console.line("2. Back to Edit Format");
            console.line("0. Back to Main Menu");
            let Input::Line(line) = read(console, "Enter your choice [0-2, Enter=1]: ")? else {
                return Ok(Next::End(Flow::EndOfInput));
            };
            match step::pick_launch_action(&line) {
                StepOutcome::Chosen(LaunchAction::Launch) => {
                    return self.launch(console, &command).map(Next::End);
                }
                StepOutcome::Chosen(LaunchAction::ChangeFormat) => return Ok(Next::Go(Step::Format)),
                StepOutcome::Chosen(LaunchAction::MainMenu) | StepOutcome::Back => {
                    return Ok(Next::End(Flow::MainMenu))
                }
                StepOutcome::Invalid(e) => {
                    debug!(error = %e, "Invalid launch choice");
                    console.error(INVALID_CHOICE);
                }
            }
        }
    }

    fn launch(&self, console: &mut dyn Console, command: &CommandLine) -> io::Result<Flow> {
        console.line(&format!("Launching {}...", command.program()));
        let failure = match self.executor.execute(command) {
            Ok(0) => {
                info!(program = %command.program(), "External tool finished");
                return Ok(Flow::Launched);
            }
            Ok(code) => LaunchError::NonZeroExit {
                program: command.program().to_string(),
                code,
            },
            Err(e) => e,
        };
        warn!(error = %failure, "Launch failed");
        console.error(&failure.to_string());
        pause(console)?;
        Ok(Flow::LaunchFailed)
    }

    fn show_launch_screen(&self, console: &mut dyn Console, selection: &Selection, command: &CommandLine) {
        screen::show_header(console, TitleKey::Launch(selection.mode));
        let main = format!("{} / {}", selection.main_vendor, selection.main_model);
        match selection.mode {
            Mode::Code => console.line(&format!("Model:        {}", main)),
            Mode::Architect => {
                console.line(&format!("Architect:    {}", main));
                match &selection.editor {
                    EditorChoice::UseMain => console.line("Editor:       same as architect"),
                    EditorChoice::Explicit { vendor, model } => {
                        console.line(&format!("Editor:       {} / {}", vendor, model))
                    }
                }
            }
        }
        console.line(&format!("Edit Format:  {}", selection.format));
        console.line(&screen::separator_sub());
        console.heading("AIDER LAUNCH COMMAND:");
        console.line(&screen::wrap_tokens(&command.render_tokens(true), console.width()));
        console.line(&screen::separator_sub());

        let Some(path) = self.config.tool.config_preview_path() else {
            return;
        };
        match read_tool_config_preview(&path) {
            None => {}
            Some(Ok(text)) => {
                console.heading(&format!("Contents of {}:", path.display()));
                console.line(text.trim_end());
                console.line(&screen::separator_sub());
            }
            Some(Err(e)) => {
                console.error(&format!("Could not read {}: {}", path.display(), e));
                console.line(&screen::separator_sub());
            }
        }
    }
}

fn menu_prompt(count: usize) -> String {
    if count == 0 {
        "Enter your choice [Enter=0]: ".to_string()
    } else {
        format!("Enter your choice [1-{}, Enter=0]: ", count)
    }
}

fn read(console: &mut dyn Console, prompt: &str) -> io::Result<Input> {
    Ok(match console.read_line(prompt)? {
        Some(line) => Input::Line(line),
        None => Input::Closed,
    })
}

/// Wait for Enter. A closed input is picked up by the next menu read.
fn pause(console: &mut dyn Console) -> io::Result<()> {
    console.read_line("Press Enter to return to the main menu...")?;
    Ok(())
}
