//! End-to-end wizard sessions: config file, keys file, scripted console,
//! recording executor.

use aider_launch::cli::RunContext;
use aider_launch::config::ConfigLoader;
use aider_launch::credentials::MemoryEnvironment;
use aider_launch::wizard::ScriptedConsole;
use tempfile::TempDir;

use super::test_utils::{write_file, RecordingExecutor, SAMPLE_CONFIG};

fn context(dir: &TempDir, keys: &str, env: MemoryEnvironment) -> RunContext {
    let config_path = write_file(dir.path(), "aider_config.json", SAMPLE_CONFIG);
    let keys_path = write_file(dir.path(), "keys", keys);
    let config = ConfigLoader::load_from_file(&config_path).unwrap();
    let mut env = env;
    RunContext::resolve(config, Some(keys_path), &mut env)
}

fn titles(console: &ScriptedConsole) -> Vec<String> {
    console
        .output()
        .iter()
        .map(|l| l.trim().to_string())
        .filter(|l| l.starts_with("SELECT") || l.starts_with("LAUNCHING"))
        .collect()
}

#[test]
fn test_code_mode_with_file_key_launches_with_flag() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir, "ANTHROPIC_API_KEY=sk-ant-secret\n", MemoryEnvironment::new());
    let executor = RecordingExecutor::with_exit_codes(&[0]);
    // mode, vendor (only ANTHROPIC listed), model, format "diff", launch, exit
    let mut console = ScriptedConsole::new(["1", "1", "1", "3", "", "0"]);

    let output = ctx.execute(None, &mut console, &executor).unwrap();

    assert_eq!(output.exit_code, 0);
    assert_eq!(
        executor.runs(),
        vec![vec![
            "aider",
            "--model",
            "claude-3-5-haiku-20241022",
            "--anthropic-api-key",
            "sk-ant-secret",
            "--chat-mode",
            "code",
            "--edit-format",
            "diff",
        ]]
    );
    let transcript = console.transcript();
    assert!(transcript.contains("--anthropic-api-key ****"));
    assert!(!transcript.contains("sk-ant-secret"));
}

#[test]
fn test_architect_reuse_main_omits_editor_flags() {
    let dir = TempDir::new().unwrap();
    let ctx = context(
        &dir,
        "",
        MemoryEnvironment::new().with("OPENAI_API_KEY", "sk-env"),
    );
    let executor = RecordingExecutor::with_exit_codes(&[0]);
    let mut console = ScriptedConsole::new(["2", "1", "2", "9", "1", "1", "0"]);

    ctx.execute(None, &mut console, &executor).unwrap();

    assert_eq!(
        executor.runs(),
        vec![vec!["aider", "--model", "o3", "--architect"]]
    );
    assert!(console.transcript().contains("Editor:       same as architect"));
}

#[test]
fn test_invalid_model_input_keeps_selection() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir, "OPENAI_API_KEY=k\n", MemoryEnvironment::new());
    let executor = RecordingExecutor::with_exit_codes(&[0]);
    let mut console = ScriptedConsole::new(["1", "1", "abc", "2", "1", "", "0"]);

    ctx.execute(None, &mut console, &executor).unwrap();

    let titles = titles(&console);
    assert_eq!(titles[2], "SELECT CODE MODE MODEL");
    assert_eq!(titles[3], "SELECT CODE MODE MODEL");
    assert!(console.transcript().contains("Invalid choice."));
    assert_eq!(executor.runs()[0][2], "o3");
}

#[test]
fn test_code_mode_format_back_returns_one_step_at_a_time() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir, "OPENAI_API_KEY=k\n", MemoryEnvironment::new());
    let executor = RecordingExecutor::with_exit_codes(&[]);
    let mut console = ScriptedConsole::new(["1", "1", "1", "0", "0", "0", "0"]);

    let output = ctx.execute(None, &mut console, &executor).unwrap();

    assert_eq!(
        &titles(&console)[3..],
        [
            "SELECT CODE MODE EDIT FORMAT",
            "SELECT CODE MODE MODEL",
            "SELECT CODE MODE VENDOR",
            "SELECT AIDER OPERATING MODE",
        ]
    );
    assert!(executor.runs().is_empty());
    assert_eq!(output.exit_code, 0);
}

#[test]
fn test_failed_launch_returns_to_mode_menu_and_sets_exit_code() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir, "OPENAI_API_KEY=k\n", MemoryEnvironment::new());
    let executor = RecordingExecutor::with_exit_codes(&[2]);
    let mut console = ScriptedConsole::new(["1", "1", "1", "1", "", "", "0"]);

    let output = ctx.execute(None, &mut console, &executor).unwrap();

    assert_eq!(output.exit_code, 1);
    assert!(console.transcript().contains("exit status 2"));
    assert_eq!(titles(&console).last().unwrap(), "SELECT AIDER OPERATING MODE");
}

#[test]
fn test_successful_relaunch_clears_failure() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir, "OPENAI_API_KEY=k\n", MemoryEnvironment::new());
    let executor = RecordingExecutor::with_exit_codes(&[2, 0]);
    let mut console = ScriptedConsole::new([
        "1", "1", "1", "1", "", "", // first attempt fails, pause
        "1", "1", "1", "1", "", // second attempt succeeds
        "0",
    ]);

    let output = ctx.execute(None, &mut console, &executor).unwrap();

    assert_eq!(executor.runs().len(), 2);
    assert_eq!(output.exit_code, 0);
}

#[test]
fn test_missing_tool_reported() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir, "OPENAI_API_KEY=k\n", MemoryEnvironment::new());
    let executor = RecordingExecutor::missing_tool();
    let mut console = ScriptedConsole::new(["1", "1", "1", "1", "", "0"]);

    let output = ctx.execute(None, &mut console, &executor).unwrap();

    assert!(console.transcript().contains("Ensure it is installed and in your PATH"));
    assert!(executor.runs().is_empty());
    assert_eq!(output.exit_code, 1);
}

#[test]
fn test_end_of_input_exits_cleanly() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir, "OPENAI_API_KEY=k\n", MemoryEnvironment::new());
    let executor = RecordingExecutor::with_exit_codes(&[]);
    let mut console = ScriptedConsole::new(["2"]);

    let output = ctx.execute(None, &mut console, &executor).unwrap();

    assert_eq!(output.exit_code, 0);
    assert!(executor.runs().is_empty());
}
