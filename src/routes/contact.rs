// src/routes/contact.rs
use axum::Json;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{ContactInfo, ContactMessage, ContactReceipt},
};

pub const CONTACT_THANKS: &str = "Thank you for your message. We'll get back to you shortly!";

pub async fn contact_info_handler() -> Json<ContactInfo> {
    Json(ContactInfo {
        email: "support@logisticsai.com".to_string(),
        phone: "+1 (800) 123-4567".to_string(),
        website: "https://www.logisticsai.com".to_string(),
        office_address: vec![
            "Logistics AI Headquarters".to_string(),
            "123 Shipping Lane".to_string(),
            "Freightville, LG 12345".to_string(),
            "United States".to_string(),
        ],
        availability: "Our customer support team is available 24/7 to assist you with any questions or concerns.".to_string(),
    })
}

// Messages are acknowledged and logged, not stored.
pub async fn contact_message_handler(
    Json(payload): Json<ContactMessage>,
) -> Result<Json<ContactReceipt>, AppError> {
    if payload.message.trim().is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    let reference = Uuid::new_v4();
    info!(
        %reference,
        name = payload.name.trim(),
        email = payload.email.trim(),
        length = payload.message.len(),
        "contact message received"
    );

    Ok(Json(ContactReceipt {
        reference,
        reply: CONTACT_THANKS.to_string(),
    }))
}
