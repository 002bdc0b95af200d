pub mod api;

#[cfg(test)]
mod mod_test;

use crate::app_error::AppError;
use crate::config::Config;
use crate::context::FileContext;
use crate::prompt_builder::build_prompt;
use crate::response_parser::{parse_response, Action};
use crate::system_prompts::DEBUGGING_ASSISTANT;
use api::{AnthropicClient, LlmApi, MessagesRequest};
use std::time::Instant;

pub async fn query(
    config: &Config,
    context: Option<&FileContext>,
) -> Result<Vec<Action>, AppError> {
    let client = AnthropicClient::new(
        config.api_key.clone(),
        config.base_url.clone(),
        config.model.clone(),
        config.timeout,
    )?;
    query_internal(&client, &config.prompt, context, config.max_tokens).await
}

async fn query_internal(
    api_client: &dyn LlmApi,
    prompt: &str,
    context: Option<&FileContext>,
    max_tokens: u32,
) -> Result<Vec<Action>, AppError> {
    tracing::debug!(%prompt, "sending prompt to model");

    let user_text = build_prompt(prompt, context);
    let request = MessagesRequest::new(
        api_client.model_name(),
        DEBUGGING_ASSISTANT,
        &user_text,
        max_tokens,
    );

    let start_time = Instant::now();
    let response = api_client.send(&request).await?;
    tracing::info!(
        "LLM call to {} took {:.3}s",
        api_client.model_name(),
        start_time.elapsed().as_secs_f64()
    );

    let Some(reply) = response.reply_text() else {
        tracing::debug!("response contained no content blocks");
        return Ok(Vec::new());
    };

    let actions = parse_response(reply);
    tracing::debug!(count = actions.len(), "received actions");
    Ok(actions)
}
