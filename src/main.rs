mod app_error;
mod cli;
mod config;
mod context;
mod executor;
mod file_updater;
mod llm;
mod logging;
mod prompt_builder;
mod response_parser;
mod system_prompts;

#[cfg(test)]
mod logging_test;

use crate::app_error::AppError;
use crate::config::{Config, ContextSource};
use crate::executor::Executor;
use std::io;
use std::process::exit;

#[tokio::main]
async fn main() {
    let cli_args = cli::parse_cli_args();

    match run(cli_args).await {
        Ok(()) => exit(0),
        Err(e) => {
            eprintln!("An error occurred: {e}");
            exit(1);
        }
    }
}

async fn run(cli_args: cli::CliArgs) -> Result<(), AppError> {
    let config = Config::load(&cli_args)?;

    if let Err(e) = logging::init(config.debug) {
        eprintln!("{e}");
    }
    if let Some(dir) = &config.ignored_context_dir {
        tracing::warn!(
            dir = %dir.display(),
            "both --context and --context-dir given; using the file"
        );
    }

    tracing::debug!(
        "Initializing client with API key: {}",
        logging::mask_api_key(&config.api_key)
    );

    let context = match &config.context {
        ContextSource::None => None,
        ContextSource::File(path) => Some(context::load_single_file(path)?),
        ContextSource::Dir(dir) => Some(context::load_directory(dir)?),
    };

    let actions = llm::query(&config, context.as_ref()).await?;

    let stdin = io::stdin();
    let mut executor = Executor::new(stdin.lock(), io::stdout(), config.dry_run);
    let report = executor.run(&actions)?;

    tracing::info!(
        executed = report.executed,
        skipped = report.skipped,
        failed = report.failed,
        "finished"
    );
    Ok(())
}
