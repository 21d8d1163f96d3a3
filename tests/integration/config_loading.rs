//! Configuration loading from the global location, adjacent file and `--config`.

use aider_launch::config::{global_config_base, ConfigLoader};
use aider_launch::error::ConfigError;
use aider_launch::selection::Mode;
use tempfile::TempDir;

use super::test_utils::{with_xdg_env, write_file, SAMPLE_CONFIG};

#[test]
fn test_global_config_under_xdg_config_home() {
    let test_dir = TempDir::new().unwrap();
    write_file(test_dir.path(), "aider-launch/config.json", SAMPLE_CONFIG);

    let config = with_xdg_env(&test_dir, || {
        let base = global_config_base().unwrap();
        assert_eq!(base, test_dir.path().join("aider-launch").join("config"));
        ConfigLoader::load_from_locations(Some(base), None)
    })
    .unwrap();

    assert_eq!(config.vendors, vec!["OPENAI", "ANTHROPIC", "GOOGLE"]);
    assert_eq!(config.edit_formats.for_mode(Mode::Architect)[1], "editor-diff");
}

#[test]
fn test_global_toml_config() {
    let test_dir = TempDir::new().unwrap();
    write_file(
        test_dir.path(),
        "aider-launch/config.toml",
        r#"
vendors = ["OPENAI"]

[models]
OPENAI = ["gpt-4o"]

[edit_formats]
code = ["whole"]
architect = ["editor-whole"]

[vendor_overrides.OPENAI]
cli_flag = "--api-key"
prefix = "openai"
"#,
    );

    let config = with_xdg_env(&test_dir, || {
        ConfigLoader::load_from_locations(global_config_base(), None)
    })
    .unwrap();

    let registry = config.vendor_registry();
    let flag = registry.get("OPENAI").unwrap().cli_flag.as_ref().unwrap();
    assert_eq!(flag.name, "--api-key");
    assert_eq!(flag.encoding.encode("k"), "openai=k");
}

#[test]
fn test_explicit_config_file_replaces_default_locations() {
    let test_dir = TempDir::new().unwrap();
    write_file(test_dir.path(), "aider-launch/config.json", SAMPLE_CONFIG);
    let explicit = write_file(
        test_dir.path(),
        "explicit.json",
        r#"{"vendors": ["DEEPSEEK"], "models": {"DEEPSEEK": ["deepseek-chat"]},
            "edit_formats": {"code": ["diff"], "architect": ["editor-diff"]}}"#,
    );

    let config = with_xdg_env(&test_dir, || ConfigLoader::load_from_file(&explicit)).unwrap();
    assert_eq!(config.vendors, vec!["DEEPSEEK"]);
}

#[test]
fn test_missing_required_fields_reported_together() {
    let test_dir = TempDir::new().unwrap();
    let path = write_file(test_dir.path(), "partial.json", r#"{"vendors": ["OPENAI"]}"#);

    match ConfigLoader::load_from_file(&path) {
        Err(ConfigError::MissingFields(fields)) => assert_eq!(fields, vec!["models", "edit_formats"]),
        other => panic!("expected MissingFields, got {other:?}"),
    }
}

#[test]
fn test_vendor_without_models_is_rejected() {
    let test_dir = TempDir::new().unwrap();
    let path = write_file(
        test_dir.path(),
        "aider_config.json",
        r#"{"vendors": ["OPENAI", "ANTHROPIC"], "models": {"OPENAI": ["gpt-4o"]},
            "edit_formats": {"code": ["whole"], "architect": ["editor-whole"]}}"#,
    );

    match ConfigLoader::load_from_file(&path) {
        Err(ConfigError::VendorsWithoutModels(vendors)) => assert_eq!(vendors, vec!["ANTHROPIC"]),
        other => panic!("expected VendorsWithoutModels, got {other:?}"),
    }
}

#[test]
fn test_empty_format_list_is_rejected() {
    let test_dir = TempDir::new().unwrap();
    let path = write_file(
        test_dir.path(),
        "aider_config.json",
        r#"{"vendors": ["OPENAI"], "models": {"OPENAI": ["gpt-4o"]},
            "edit_formats": {"code": [], "architect": ["editor-whole"]}}"#,
    );

    assert!(matches!(
        ConfigLoader::load_from_file(&path),
        Err(ConfigError::EmptyFormats(_))
    ));
}

#[test]
fn test_nothing_found_reports_searched_paths() {
    let test_dir = TempDir::new().unwrap();
    let adjacent = test_dir.path().join("bin").join("aider_config.json");

    let err = with_xdg_env(&test_dir, || {
        ConfigLoader::load_from_locations(global_config_base(), Some(adjacent.clone()))
    })
    .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("aider_config.json"));
    assert!(message.contains("aider-launch"));
}
