//! Properties of command assembly

use aider_launch::command::CommandBuilder;
use aider_launch::credentials::{Credential, CredentialMap, KeysFileSearch};
use aider_launch::selection::{EditorChoice, FormatChoice, Selection};
use aider_launch::vendor::VendorRegistry;
use proptest::prelude::*;
use std::collections::HashMap;

const VENDORS: [&str; 4] = ["OPENAI", "ANTHROPIC", "DEEPSEEK", "GOOGLE"];

fn setup(file_sourced: &[bool; 4]) -> (VendorRegistry, CredentialMap) {
    let names: Vec<String> = VENDORS.iter().map(|v| v.to_string()).collect();
    let registry = VendorRegistry::from_vendors(&names, &HashMap::new());
    let mut map = CredentialMap::new(KeysFileSearch::default());
    for (vendor, from_file) in VENDORS.iter().zip(file_sourced) {
        let descriptor = registry.get(vendor).unwrap();
        let variable = descriptor.preferred_name();
        let credential = if *from_file {
            Credential::from_file(variable, &format!("{vendor}-secret"))
        } else {
            Credential::from_environment(variable, &format!("{vendor}-secret"))
        };
        map.insert(vendor, descriptor.credential_names.clone(), credential);
    }
    (registry, map)
}

fn flag_count(tokens: &[String], registry: &VendorRegistry, vendor: &str) -> usize {
    let flag = &registry.get(vendor).unwrap().cli_flag.as_ref().unwrap().name;
    tokens.iter().filter(|t| *t == flag).count()
}

/// A file-sourced main vendor yields exactly one credential flag; an
/// environment-sourced one yields none.
#[test]
fn test_main_vendor_flag_follows_source() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(any::<[bool; 4]>(), 0..4usize, "[a-z0-9][a-z0-9.-]{0,19}"),
            |(sources, vendor_idx, model)| {
                let (registry, map) = setup(&sources);
                let vendor = VENDORS[vendor_idx];
                let cmd = CommandBuilder::new(&registry, &map)
                    .build(&Selection::code(vendor, &model));
                let tokens = cmd.tokens();

                let expected = usize::from(sources[vendor_idx]);
                prop_assert_eq!(flag_count(&tokens, &registry, vendor), expected);
                prop_assert_eq!(&tokens[1], "--model");
                prop_assert_eq!(&tokens[2], &model);
                Ok(())
            },
        )
        .unwrap();
}

/// Architect builds with the editor on the main vendor never add a second
/// credential flag.
#[test]
fn test_same_vendor_editor_never_duplicates_flag() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(any::<[bool; 4]>(), 0..4usize, any::<bool>()),
            |(sources, vendor_idx, reuse)| {
                let (registry, map) = setup(&sources);
                let vendor = VENDORS[vendor_idx];
                let editor = if reuse {
                    EditorChoice::UseMain
                } else {
                    EditorChoice::Explicit {
                        vendor: vendor.to_string(),
                        model: "editor-model".to_string(),
                    }
                };
                let cmd = CommandBuilder::new(&registry, &map)
                    .build(&Selection::architect(vendor, "main-model", editor));
                let tokens = cmd.tokens();

                prop_assert!(flag_count(&tokens, &registry, vendor) <= 1);
                prop_assert!(tokens.iter().any(|t| t == "--architect"));
                prop_assert_eq!(tokens.iter().any(|t| t == "--editor-model"), !reuse);
                Ok(())
            },
        )
        .unwrap();
}

/// The displayed command never contains a secret value.
#[test]
fn test_rendered_command_hides_secrets() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(any::<[bool; 4]>(), 0..4usize, 0..4usize, proptest::option::of("[a-z]{1,12}")),
            |(sources, main_idx, editor_idx, format)| {
                let (registry, map) = setup(&sources);
                let selection = Selection::architect(
                    VENDORS[main_idx],
                    "m",
                    EditorChoice::Explicit {
                        vendor: VENDORS[editor_idx].to_string(),
                        model: "e".to_string(),
                    },
                )
                .with_format(match format {
                    Some(f) => FormatChoice::Explicit(f),
                    None => FormatChoice::ToolDefault,
                });
                let cmd = CommandBuilder::new(&registry, &map).build(&selection);
                let shown = cmd.render(true);
                prop_assert!(!shown.contains("-secret"));
                Ok(())
            },
        )
        .unwrap();
}

/// Appending a format never changes the base arguments.
#[test]
fn test_format_only_appends() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(any::<[bool; 4]>(), 0..4usize, "[a-z-]{1,12}"),
            |(sources, vendor_idx, format)| {
                let (registry, map) = setup(&sources);
                let builder = CommandBuilder::new(&registry, &map);
                let base = builder.build_base(&Selection::code(VENDORS[vendor_idx], "m"));
                let with = base.with_format(&FormatChoice::Explicit(format.clone()));
                let base_tokens = base.tokens();
                let with_tokens = with.tokens();

                prop_assert_eq!(&with_tokens[..base_tokens.len()], &base_tokens[..]);
                prop_assert_eq!(
                    &with_tokens[base_tokens.len()..],
                    &["--edit-format".to_string(), format][..]
                );
                Ok(())
            },
        )
        .unwrap();
}
