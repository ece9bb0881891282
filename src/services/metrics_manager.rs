use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::services::chatbot::ReplySource;
use crate::services::knowledge_base::Topic;

#[derive(Debug, Default, Clone, Serialize)]
pub struct MetricsData {
    pub reply_sources: HashMap<String, u64>,
    pub fallback_topics: HashMap<String, u64>,
    pub shipping_calls: HashMap<String, u64>,
}

#[derive(Debug, Clone)]
pub struct MetricsManager {
    inner: Arc<RwLock<MetricsData>>,
}

impl Default for MetricsManager {
    fn default() -> Self {
        Self::new()
    }
}

fn bump(map: &mut HashMap<String, u64>, key: &str) {
    *map.entry(key.to_string()).or_insert(0) += 1;
}

impl MetricsManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsData::default())),
        }
    }

    pub async fn record_reply(&self, source: ReplySource) {
        let mut data = self.inner.write().await;
        bump(&mut data.reply_sources, source.as_str());
    }

    /// `None` counts as "general", the catch-all prompt.
    pub async fn record_fallback_topic(&self, topic: Option<&Topic>) {
        let mut data = self.inner.write().await;
        bump(&mut data.fallback_topics, topic.map_or("general", |t| t.phrase));
    }

    pub async fn record_shipping(&self, outcome: &str) {
        let mut data = self.inner.write().await;
        bump(&mut data.shipping_calls, outcome);
    }

    pub async fn get_metrics(&self) -> MetricsData {
        self.inner.read().await.clone()
    }
}
