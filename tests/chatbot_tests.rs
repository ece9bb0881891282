mod common;

use axum::http::StatusCode;
use common::{MockBackend, config};
use logistics_assistant::services::chatbot::{
    ChatOrchestrator, FallbackReason, ReplySource, SYSTEM_PROMPT,
};
use logistics_assistant::services::history::{ChatHistory, ChatMessage};
use logistics_assistant::services::knowledge_base::fallback;
use serde_json::json;

const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

fn orchestrator(mock: &MockBackend, api_key: Option<&str>) -> ChatOrchestrator {
    let mut pairs = vec![("GROQ_API_URL", mock.url(COMPLETIONS_PATH))];
    if let Some(key) = api_key {
        pairs.push(("GROQ_API_KEY", key.to_string()));
    }
    ChatOrchestrator::new(reqwest::Client::new(), config(&pairs).chat)
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[tokio::test]
async fn no_credential_matches_fallback_without_calling_backend() {
    let mock = MockBackend::start(StatusCode::OK, completion("unused")).await;
    let bot = orchestrator(&mock, None);

    let reply = bot.get_response("what are your rates?", &ChatHistory::new()).await;

    assert_eq!(reply.text, fallback("what are your rates?"));
    assert_eq!(reply.source, ReplySource::Fallback(FallbackReason::NotConfigured));
    assert_eq!(mock.hits().await, 0);
}

#[tokio::test]
async fn server_error_falls_back() {
    let mock = MockBackend::start(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": { "message": "boom" } }),
    )
    .await;
    let bot = orchestrator(&mock, Some("gsk_test"));

    let reply = bot
        .get_response("Any tips on packaging fragile goods?", &ChatHistory::new())
        .await;

    assert_eq!(reply.text, fallback("Any tips on packaging fragile goods?"));
    assert_eq!(reply.source, ReplySource::Fallback(FallbackReason::BackendFailed));
    assert_eq!(mock.hits().await, 1);
}

#[tokio::test]
async fn unreachable_backend_falls_back() {
    // Nothing listens on port 9 of the loopback interface.
    let pairs = vec![
        ("GROQ_API_URL", "http://127.0.0.1:9/v1/chat".to_string()),
        ("GROQ_API_KEY", "gsk_test".to_string()),
    ];
    let bot = ChatOrchestrator::new(reqwest::Client::new(), config(&pairs).chat);

    let reply = bot.get_response("customs", &ChatHistory::new()).await;
    assert!(reply.is_fallback());
    assert_eq!(reply.text, fallback("customs"));
}

#[tokio::test]
async fn malformed_success_body_falls_back() {
    let mock = MockBackend::start(StatusCode::OK, json!({ "choices": [] })).await;
    let bot = orchestrator(&mock, Some("gsk_test"));

    let reply = bot.get_response("hello", &ChatHistory::new()).await;
    assert_eq!(reply.source, ReplySource::Fallback(FallbackReason::BackendFailed));
}

#[tokio::test]
async fn forwards_only_recent_window() {
    let mock = MockBackend::start(StatusCode::OK, completion("Sure.")).await;
    let bot = orchestrator(&mock, Some("gsk_test"));

    let mut history = ChatHistory::new();
    for i in 0..7 {
        if i % 2 == 0 {
            history.push(ChatMessage::user(format!("question {i}")));
        } else {
            history.push(ChatMessage::assistant(format!("answer {i}")));
        }
    }

    bot.get_response("next question", &history).await;

    let requests = mock.requests().await;
    assert_eq!(requests.len(), 1);
    let body = requests[0].body.as_ref().unwrap();
    let messages = body["messages"].as_array().unwrap();

    assert_eq!(messages.len(), 7);
    assert_eq!(messages[0], json!({ "role": "system", "content": SYSTEM_PROMPT }));
    assert_eq!(messages[1], json!({ "role": "user", "content": "question 2" }));
    assert_eq!(messages[5], json!({ "role": "user", "content": "question 6" }));
    assert_eq!(messages[6], json!({ "role": "user", "content": "next question" }));
}

#[tokio::test]
async fn success_returns_content_unmodified() {
    let content = "  FTL means full truckload.\n";
    let mock = MockBackend::start(StatusCode::OK, completion(content)).await;
    let bot = orchestrator(&mock, Some("gsk_test"));

    let reply = bot.get_response("What is FTL?", &ChatHistory::new()).await;
    assert_eq!(reply.text, content);
    assert_eq!(reply.source, ReplySource::Assistant);

    let request = &mock.requests().await[0];
    assert_eq!(request.path, COMPLETIONS_PATH);
    assert_eq!(request.authorization.as_deref(), Some("Bearer gsk_test"));

    let body = request.body.as_ref().unwrap();
    assert_eq!(body["model"], "mixtral-8x7b-32768");
    assert_eq!(body["max_tokens"], 500);
    let temperature = body["temperature"].as_f64().unwrap();
    assert!((temperature - 0.7).abs() < 1e-6);
}
