use axum::{Json, extract::State};
use tracing::info;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, GreetingResponse},
    services::{
        chatbot::{decorate_reply, format_timestamp, greeting},
        history::ChatMessage,
        knowledge_base::match_topic,
        metrics_manager::MetricsData,
    },
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let trimmed = payload.message.trim();

    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    let mut history = payload.history;
    let reply = state.chatbot.get_response(trimmed, &history).await;

    state.metrics.record_reply(reply.source).await;
    if reply.is_fallback() {
        state.metrics.record_fallback_topic(match_topic(trimmed)).await;
    }
    info!(source = reply.source.as_str(), history_len = history.len(), "chat reply");

    let decorated = decorate_reply(&reply.text, &format_timestamp());
    history.push(ChatMessage::user(trimmed));
    history.push(ChatMessage::assistant(decorated.clone()));

    Ok(Json(ChatResponse {
        reply: decorated,
        source: reply.source.as_str().to_string(),
        history,
    }))
}

pub async fn greeting_handler() -> Json<GreetingResponse> {
    Json(GreetingResponse {
        greeting: greeting().to_string(),
    })
}

pub async fn get_metrics_handler(State(state): State<SharedState>) -> Json<MetricsData> {
    Json(state.metrics.get_metrics().await)
}
