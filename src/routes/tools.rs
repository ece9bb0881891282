// src/routes/tools.rs
use axum::{Json, extract::State};

use crate::{
    error::{AppError, BackendError},
    message::{RatesRequest, ToolResponse, TopicQuery, TrackRequest},
    services::{
        chatbot::TopicGuide,
        history::ChatHistory,
        shipping::{render_rates, render_tracking},
    },
    state::SharedState,
};

fn outcome_label<T>(
    outcome: &Result<T, BackendError>,
    ok: &'static str,
    unconfigured: &'static str,
    failed: &'static str,
) -> &'static str {
    match outcome {
        Ok(_) => ok,
        Err(err) if err.is_configuration_missing() => unconfigured,
        Err(_) => failed,
    }
}

pub async fn rates_handler(
    State(state): State<SharedState>,
    Json(payload): Json<RatesRequest>,
) -> Result<Json<ToolResponse>, AppError> {
    if let Some(field) = payload.parcel.invalid_field() {
        return Err(AppError::BadRequest(format!(
            "Parcel {field} must be a positive number"
        )));
    }

    let outcome = state
        .shipping
        .quote_rates(&payload.origin, &payload.destination, &payload.parcel)
        .await;

    let label = match &outcome {
        Ok(quotes) if quotes.is_empty() => "rates_empty",
        _ => outcome_label(&outcome, "rates_ok", "rates_error", "rates_error"),
    };
    state.metrics.record_shipping(label).await;

    Ok(Json(ToolResponse {
        result: render_rates(&outcome),
    }))
}

pub async fn track_handler(
    State(state): State<SharedState>,
    Json(payload): Json<TrackRequest>,
) -> Result<Json<ToolResponse>, AppError> {
    let tracking_number = payload.tracking_number.trim();
    if tracking_number.is_empty() {
        return Err(AppError::BadRequest("Tracking number cannot be empty".to_string()));
    }

    let outcome = state.shipping.track(tracking_number, &payload.carrier).await;
    let label = outcome_label(&outcome, "track_ok", "track_unavailable", "track_error");
    state.metrics.record_shipping(label).await;

    Ok(Json(ToolResponse {
        result: render_tracking(&outcome),
    }))
}

async fn ask_guide(state: &SharedState, guide: TopicGuide, query: &str) -> Result<String, AppError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest("Query cannot be empty".to_string()));
    }
    let reply = state
        .chatbot
        .get_response(&guide.prompt(query), &ChatHistory::new())
        .await;
    state.metrics.record_reply(reply.source).await;
    Ok(reply.text)
}

pub async fn trucking_handler(
    State(state): State<SharedState>,
    Json(payload): Json<TopicQuery>,
) -> Result<Json<ToolResponse>, AppError> {
    let result = ask_guide(&state, TopicGuide::Trucking, &payload.query).await?;
    Ok(Json(ToolResponse { result }))
}

pub async fn freight_forwarding_handler(
    State(state): State<SharedState>,
    Json(payload): Json<TopicQuery>,
) -> Result<Json<ToolResponse>, AppError> {
    let result = ask_guide(&state, TopicGuide::FreightForwarding, &payload.query).await?;
    Ok(Json(ToolResponse { result }))
}
