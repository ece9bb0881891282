// src/config.rs
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use reqwest::Url;

pub const DEFAULT_CHAT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_SHIPPING_API_URL: &str = "https://api.goshippo.com";
pub const DEFAULT_CHAT_MODEL: &str = "mixtral-8x7b-32768";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Chat-completion backend settings.
#[derive(Clone, Debug)]
pub struct ChatConfig {
    pub api_url: Url,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Shipping backend settings. `api_base` is the host root; endpoint paths are
/// appended to it.
#[derive(Clone, Debug)]
pub struct ShippingConfig {
    pub api_base: Url,
    pub api_key: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub request_timeout: Duration,
    pub chat: ChatConfig,
    pub shipping: ShippingConfig,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Blank values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR is not a valid socket address")?;

        let timeout_secs = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("HTTP_TIMEOUT_SECS must be a whole number, got {raw:?}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let chat_url = get("GROQ_API_URL").unwrap_or_else(|| DEFAULT_CHAT_API_URL.to_string());
        let shipping_url =
            get("SHIPPO_API_URL").unwrap_or_else(|| DEFAULT_SHIPPING_API_URL.to_string());

        Ok(Self {
            bind_addr,
            request_timeout: Duration::from_secs(timeout_secs),
            chat: ChatConfig {
                api_url: Url::parse(&chat_url)
                    .with_context(|| format!("GROQ_API_URL is not a valid URL: {chat_url}"))?,
                api_key: get("GROQ_API_KEY"),
                model: get("CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
                max_tokens: 500,
                temperature: 0.7,
            },
            shipping: ShippingConfig {
                api_base: Url::parse(&shipping_url)
                    .with_context(|| format!("SHIPPO_API_URL is not a valid URL: {shipping_url}"))?,
                api_key: get("SHIPPO_API_KEY"),
            },
        })
    }
}
