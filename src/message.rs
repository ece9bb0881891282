// src/message.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::history::ChatHistory;
use crate::services::shipping::{Address, Carrier, Parcel};

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: ChatHistory,
}

#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub source: String,
    /// The submitted history with this exchange appended.
    pub history: ChatHistory,
}

#[derive(Serialize, Deserialize)]
pub struct GreetingResponse {
    pub greeting: String,
}

#[derive(Deserialize)]
pub struct RatesRequest {
    pub origin: Address,
    pub destination: Address,
    pub parcel: Parcel,
}

#[derive(Deserialize)]
pub struct TrackRequest {
    pub tracking_number: String,
    pub carrier: Carrier,
}

#[derive(Deserialize)]
pub struct TopicQuery {
    pub query: String,
}

#[derive(Serialize, Deserialize)]
pub struct ToolResponse {
    pub result: String,
}

#[derive(Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub website: String,
    pub office_address: Vec<String>,
    pub availability: String,
}

#[derive(Deserialize)]
pub struct ContactMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct ContactReceipt {
    pub reference: Uuid,
    pub reply: String,
}
