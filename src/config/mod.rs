use crate::app_error::AppError;
use crate::cli::CliArgs;
use std::path::PathBuf;
use std::time::Duration;

#[cfg(test)]
mod config_test;

pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
pub const BASE_URL_VAR: &str = "ANTHROPIC_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextSource {
    None,
    File(PathBuf),
    Dir(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub debug: bool,
    pub dry_run: bool,
    pub context: ContextSource,
    pub ignored_context_dir: Option<PathBuf>,
    pub prompt: String,
}

impl Config {
    pub fn load(args: &CliArgs) -> Result<Self, AppError> {
        Self::from_parts(args, |name| std::env::var(name).ok())
    }

    pub fn from_parts(
        args: &CliArgs,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let api_key = env(API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::Config(format!("{API_KEY_VAR} is required")))?;

        let base_url = env(BASE_URL_VAR)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let prompt = args.prompt_text();
        if prompt.trim().is_empty() {
            return Err(AppError::Config(
                "Usage: debugr [--context <file> | --context-dir <directory>] <prompt>".to_string(),
            ));
        }

        let mut ignored_context_dir = None;
        let context = match (&args.context, &args.context_dir) {
            (Some(file), Some(dir)) => {
                ignored_context_dir = Some(dir.clone());
                ContextSource::File(file.clone())
            }
            (Some(file), None) => ContextSource::File(file.clone()),
            (None, Some(dir)) => ContextSource::Dir(dir.clone()),
            (None, None) => ContextSource::None,
        };

        Ok(Self {
            api_key,
            base_url,
            model: args.model.clone(),
            max_tokens: args.max_tokens,
            timeout: Duration::from_secs(args.timeout_secs),
            debug: args.debug,
            dry_run: args.dry_run,
            context,
            ignored_context_dir,
            prompt,
        })
    }
}
