use crate::app_error::AppError;
use crate::cli::CliArgs;
use crate::config::{Config, ContextSource, DEFAULT_BASE_URL};
use crate::logging::level_for;
use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::filter::LevelFilter;

fn args(argv: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(std::iter::once("debugr").chain(argv.iter().copied())).unwrap()
}

fn env_with(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn test_load_with_api_key() {
    let config = Config::from_parts(
        &args(&["--timeout-secs", "9", "fix", "it"]),
        env_with(&[("ANTHROPIC_API_KEY", "  sk-ant-secret\n")]),
    )
    .unwrap();

    assert_eq!(config.api_key, "sk-ant-secret");
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.prompt, "fix it");
    assert_eq!(config.timeout, Duration::from_secs(9));
    assert_eq!(config.max_tokens, 2048);
    assert_eq!(config.context, ContextSource::None);
    assert!(!config.dry_run);
}

#[test]
fn test_missing_api_key_is_fatal() {
    let result = Config::from_parts(&args(&["hello"]), env_with(&[]));
    match result {
        Err(AppError::Config(msg)) => assert!(msg.contains("ANTHROPIC_API_KEY")),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn test_empty_api_key_is_fatal() {
    let result = Config::from_parts(&args(&["hello"]), env_with(&[("ANTHROPIC_API_KEY", "  ")]));
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[test]
fn test_blank_prompt_is_fatal() {
    let result = Config::from_parts(&args(&[" "]), env_with(&[("ANTHROPIC_API_KEY", "k")]));
    match result {
        Err(AppError::Config(msg)) => assert!(msg.starts_with("Usage:")),
        other => panic!("expected usage error, got {other:?}"),
    }
}

#[test]
fn test_base_url_override_drops_trailing_slash() {
    let config = Config::from_parts(
        &args(&["hi"]),
        env_with(&[
            ("ANTHROPIC_API_KEY", "k"),
            ("ANTHROPIC_BASE_URL", "http://127.0.0.1:9999/"),
        ]),
    )
    .unwrap();
    assert_eq!(config.base_url, "http://127.0.0.1:9999");
}

#[test]
fn test_context_file_takes_precedence_over_dir() {
    let env = env_with(&[("ANTHROPIC_API_KEY", "k")]);
    let config = Config::from_parts(
        &args(&["--context", "a.go", "--context-dir", "pkg", "hi"]),
        &env,
    )
    .unwrap();
    assert_eq!(config.context, ContextSource::File(PathBuf::from("a.go")));
    assert_eq!(config.ignored_context_dir, Some(PathBuf::from("pkg")));

    let config = Config::from_parts(&args(&["--context-dir", "pkg", "hi"]), &env).unwrap();
    assert_eq!(config.context, ContextSource::Dir(PathBuf::from("pkg")));
    assert_eq!(config.ignored_context_dir, None);
}

#[test]
fn test_debug_flag_sets_log_level() {
    let env = env_with(&[("ANTHROPIC_API_KEY", "k")]);

    let config = Config::from_parts(&args(&["--debug", "p"]), &env).unwrap();
    assert!(config.debug);
    assert_eq!(level_for(config.debug), LevelFilter::DEBUG);

    let config = Config::from_parts(&args(&["p"]), &env).unwrap();
    assert!(!config.debug);
    assert_eq!(level_for(config.debug), LevelFilter::WARN);
}
