// src/services/chatbot.rs
use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::ChatConfig;
use crate::error::BackendError;
use crate::services::history::{ChatHistory, ChatMessage};
use crate::services::knowledge_base;

/// How many trailing history messages are forwarded to the backend.
pub const HISTORY_WINDOW: usize = 5;

pub const SYSTEM_PROMPT: &str = "You are an expert AI assistant specializing in logistics, shipping, trucking, and freight forwarding. Provide accurate, helpful, and concise information to user queries. Always maintain a friendly and professional tone.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackReason {
    NotConfigured,
    BackendFailed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplySource {
    Assistant,
    Fallback(FallbackReason),
}

impl ReplySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplySource::Assistant => "assistant",
            ReplySource::Fallback(FallbackReason::NotConfigured) => "fallback_not_configured",
            ReplySource::Fallback(FallbackReason::BackendFailed) => "fallback_backend_failed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub source: ReplySource,
}

impl ChatReply {
    fn fallback(user_input: &str, reason: FallbackReason) -> Self {
        Self {
            text: knowledge_base::fallback(user_input).to_string(),
            source: ReplySource::Fallback(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, ReplySource::Fallback(_))
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Sends conversations to the chat-completion backend and falls back to the
/// knowledge base when that is not possible.
#[derive(Clone, Debug)]
pub struct ChatOrchestrator {
    client: reqwest::Client,
    config: ChatConfig,
}

impl ChatOrchestrator {
    pub fn new(client: reqwest::Client, config: ChatConfig) -> Self {
        Self { client, config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// System prompt, the trailing history window, then the new user message.
    pub fn build_messages(&self, user_input: &str, history: &ChatHistory) -> Vec<ChatMessage> {
        let window = history.window(HISTORY_WINDOW);
        let mut messages = Vec::with_capacity(window.len() + 2);
        messages.push(ChatMessage::system(SYSTEM_PROMPT));
        messages.extend_from_slice(window);
        messages.push(ChatMessage::user(user_input));
        messages
    }

    pub async fn get_response(&self, user_input: &str, history: &ChatHistory) -> ChatReply {
        let Some(api_key) = self.config.api_key.as_deref() else {
            debug!("chat backend not configured, using fallback");
            return ChatReply::fallback(user_input, FallbackReason::NotConfigured);
        };

        let messages = self.build_messages(user_input, history);
        match self.complete(api_key, &messages).await {
            Ok(text) => ChatReply {
                text,
                source: ReplySource::Assistant,
            },
            Err(err) => {
                error!(error = %err, "chat backend request failed");
                ChatReply::fallback(user_input, FallbackReason::BackendFailed)
            }
        }
    }

    async fn complete(&self, api_key: &str, messages: &[ChatMessage]) -> Result<String, BackendError> {
        let body = CompletionRequest {
            model: &self.config.model,
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(self.config.api_url.clone())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(BackendError::Status { status, body: text });
        }

        let parsed: CompletionResponse = serde_json::from_str(&text)
            .map_err(|e| BackendError::MalformedResponse(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| BackendError::MalformedResponse("response has no choices".to_string()))
    }
}

/// Tools that ask the assistant about one subject area with no history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TopicGuide {
    Trucking,
    FreightForwarding,
}

impl TopicGuide {
    pub fn prompt(&self, query: &str) -> String {
        match self {
            TopicGuide::Trucking => format!(
                "Provide information about {query} in the context of trucking and transportation."
            ),
            TopicGuide::FreightForwarding => {
                format!("Provide information about {query} in the context of freight forwarding.")
            }
        }
    }
}

pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning! How can I assist you with your logistics needs today?"
    } else if hour < 18 {
        "Good afternoon! What logistics questions can I help you with?"
    } else {
        "Good evening! How may I assist you with your shipping and logistics inquiries?"
    }
}

pub fn greeting() -> &'static str {
    greeting_for_hour(Local::now().hour())
}

pub fn format_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Text shown in the transcript for an assistant reply.
pub fn decorate_reply(reply: &str, sent_at: &str) -> String {
    format!("🤖 {reply} (sent at {sent_at})")
}
