//! Logistics assistant backend: chat with a logistics-focused AI (with an
//! offline fallback), shipping rate quotes, and shipment tracking, served
//! over HTTP with axum.

pub mod config;
pub mod error;
pub mod message;
pub mod routes;
pub mod services;
pub mod state;
