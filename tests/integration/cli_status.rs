//! `status` subcommand routing and output.

use aider_launch::cli::{Cli, Commands, RunContext};
use aider_launch::config::ConfigLoader;
use aider_launch::credentials::MemoryEnvironment;
use aider_launch::wizard::ScriptedConsole;
use clap::Parser;
use tempfile::TempDir;

use super::test_utils::{write_file, RecordingExecutor, SAMPLE_CONFIG};

fn context(dir: &TempDir) -> RunContext {
    let config_path = write_file(dir.path(), "aider_config.json", SAMPLE_CONFIG);
    let keys = write_file(dir.path(), "keys", "GEMINI_API_KEY=AIza-secret\n");
    let config = ConfigLoader::load_from_file(&config_path).unwrap();
    let mut env = MemoryEnvironment::new().with("OPENAI_API_KEY", "sk-secret");
    RunContext::resolve(config, Some(keys), &mut env)
}

#[test]
fn test_status_text() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    let cli = Cli::try_parse_from(["aider-launch", "status"]).unwrap();
    let mut console = ScriptedConsole::new(Vec::<String>::new());

    let output = ctx
        .execute(cli.command.as_ref(), &mut console, &RecordingExecutor::with_exit_codes(&[]))
        .unwrap();

    let text = output.text.unwrap();
    assert!(text.contains("OPENAI_API_KEY"));
    assert!(text.contains("GEMINI_API_KEY"));
    assert!(text.contains("Vendors with keys: 2/3"));
    assert!(!text.contains("sk-secret"));
    assert!(!text.contains("AIza-secret"));
    assert!(console.output().is_empty());
}

#[test]
fn test_status_json() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    let command = Commands::Status {
        format: "json".to_string(),
    };
    let mut console = ScriptedConsole::new(Vec::<String>::new());

    let output = ctx
        .execute(Some(&command), &mut console, &RecordingExecutor::with_exit_codes(&[]))
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&output.text.unwrap()).unwrap();
    assert_eq!(value["available"], 2);
    assert_eq!(value["vendors"][0]["source"], "env");
    assert_eq!(value["vendors"][1]["source"], "unset");
    assert_eq!(value["vendors"][2]["source"], "file");
    assert_eq!(value["vendors"][2]["cli_flag"], "--api-key");
    assert_eq!(output.exit_code, 0);
}
