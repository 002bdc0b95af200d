use super::api::{ContentBlock, LlmApi, MessagesRequest, MessagesResponse};
use super::query_internal;
use crate::app_error::AppError;
use crate::context::{File, FileContext, Language};
use crate::response_parser::{Action, ActionKind};
use crate::system_prompts::DEBUGGING_ASSISTANT;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Mutex;

struct MockLlmApiClient {
    response: Result<MessagesResponse, String>,
    last_request: Mutex<Option<MessagesRequest>>,
}

impl MockLlmApiClient {
    fn replying(text: &str) -> Self {
        Self {
            response: Ok(MessagesResponse {
                content: vec![ContentBlock::text(text)],
            }),
            last_request: Mutex::new(None),
        }
    }
}

impl LlmApi for MockLlmApiClient {
    fn model_name(&self) -> &str {
        "mock-model"
    }

    fn send<'a>(
        &'a self,
        request: &'a MessagesRequest,
    ) -> Pin<Box<dyn Future<Output = Result<MessagesResponse, AppError>> + Send + 'a>> {
        *self.last_request.lock().unwrap() = Some(request.clone());
        let resp = self.response.clone().map_err(AppError::Transport);
        Box::pin(async { resp })
    }
}

#[tokio::test]
async fn test_query_internal_parses_reply() {
    let client = MockLlmApiClient::replying(
        "The import is missing.\nMODIFY_FILE:app.py:\n```\nimport os\n```\n$ python -m pytest\n",
    );

    let actions = query_internal(&client, "fix my test", None, 1024)
        .await
        .unwrap();

    assert_eq!(actions.len(), 3);
    assert_eq!(actions[0], Action::explanation("The import is missing."));
    assert_eq!(actions[1].kind(), ActionKind::ModifyFile);
    assert_eq!(actions[1].path(), Some(Path::new("app.py")));
    assert_eq!(actions[1].content(), "import os\n");
    assert_eq!(actions[2], Action::command("python -m pytest"));
}

#[tokio::test]
async fn test_query_internal_builds_request() {
    let client = MockLlmApiClient::replying("ok");
    let context = FileContext {
        files: vec![File {
            path: PathBuf::from("calc.go"),
            content: "package calc".to_string(),
            language: Language::Go,
        }],
    };

    query_internal(&client, "add tests", Some(&context), 2048)
        .await
        .unwrap();

    let request = client.last_request.lock().unwrap().clone().unwrap();
    assert_eq!(request.model, "mock-model");
    assert_eq!(request.system, DEBUGGING_ASSISTANT);
    assert_eq!(request.max_tokens, 2048);
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].role, "user");
    let text = &request.messages[0].content[0].text;
    assert!(text.starts_with("Context:\nFile: calc.go\nLanguage: Go\n"));
    assert!(text.ends_with("Request: add tests"));
}

#[tokio::test]
async fn test_query_internal_empty_content_yields_no_actions() {
    let client = MockLlmApiClient {
        response: Ok(MessagesResponse { content: vec![] }),
        last_request: Mutex::new(None),
    };
    let actions = query_internal(&client, "hi", None, 16).await.unwrap();
    assert!(actions.is_empty());
}

#[tokio::test]
async fn test_query_internal_propagates_transport_error() {
    let client = MockLlmApiClient {
        response: Err("connection reset".to_string()),
        last_request: Mutex::new(None),
    };
    let result = query_internal(&client, "hi", None, 16).await;
    assert!(matches!(result, Err(AppError::Transport(msg)) if msg == "connection reset"));
}
