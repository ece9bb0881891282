// src/routes/mod.rs
pub mod chat;
pub mod contact;
pub mod tools;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::{chat_handler, get_metrics_handler, greeting_handler};
use contact::{contact_info_handler, contact_message_handler};
use tools::{freight_forwarding_handler, rates_handler, track_handler, trucking_handler};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    let tool_routes = Router::new()
        .route("/rates", post(rates_handler))
        .route("/track", post(track_handler))
        .route("/trucking", post(trucking_handler))
        .route("/freight-forwarding", post(freight_forwarding_handler));

    Router::new()
        .route("/chat", post(chat_handler))
        .route("/greeting", get(greeting_handler))
        .nest("/tools", tool_routes)
        .route("/contact", get(contact_info_handler).post(contact_message_handler))
        .route("/metrics", get(get_metrics_handler))
        .route("/health", get(|| async { "OK" }))
        .fallback_service(ServeDir::new("public"))
        .layer(TraceLayer::new_for_http())
}
