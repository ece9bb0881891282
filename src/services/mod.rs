// src/services/mod.rs
pub mod chatbot;
pub mod history;
pub mod knowledge_base;
pub mod metrics_manager;
pub mod shipping;
