use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20240620";
pub const DEFAULT_MAX_TOKENS: u32 = 2048;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "debugr")]
#[command(about = "Ask an LLM to help debug or test code, then review and apply its suggestions")]
pub struct CliArgs {
    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Print suggested actions without executing them
    #[arg(long)]
    pub dry_run: bool,

    /// Path to a file to use as context
    #[arg(long, value_name = "FILE")]
    pub context: Option<PathBuf>,

    /// Path to a directory to use as context (read recursively)
    #[arg(long, value_name = "DIR")]
    pub context_dir: Option<PathBuf>,

    /// Model identifier sent with the request
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Upper bound on the size of the reply
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// The prompt; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub prompt: Vec<String>,
}

impl CliArgs {
    pub fn prompt_text(&self) -> String {
        self.prompt.join(" ")
    }
}

pub fn parse_cli_args() -> CliArgs {
    CliArgs::parse()
}
