// src/state.rs
use std::sync::Arc;

use anyhow::Context;

use crate::config::Config;
use crate::services::chatbot::ChatOrchestrator;
use crate::services::metrics_manager::MetricsManager;
use crate::services::shipping::ShippingClient;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub chatbot: ChatOrchestrator,
    pub shipping: ShippingClient,
    pub metrics: MetricsManager,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            chatbot: ChatOrchestrator::new(client.clone(), config.chat.clone()),
            shipping: ShippingClient::new(client, config.shipping.clone()),
            metrics: MetricsManager::new(),
        })
    }
}
