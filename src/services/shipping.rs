// src/services/shipping.rs
use std::fmt;
use std::str::FromStr;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::ShippingConfig;
use crate::error::BackendError;

/// Only this many quotes are surfaced per request.
pub const MAX_RATES: usize = 5;

pub const RATES_HEADER: &str = "Available shipping rates:";
pub const NO_RATES_MESSAGE: &str =
    "No rates found for the given shipment details. Please check your input and try again.";
pub const RATES_ERROR_MESSAGE: &str =
    "An error occurred while fetching shipping rates. Please try again later or contact support.";
pub const TRACKING_UNAVAILABLE_MESSAGE: &str =
    "Shipment tracking is currently unavailable. Please try again later or contact support.";
pub const TRACKING_ERROR_MESSAGE: &str =
    "An error occurred while tracking the shipment. Please try again later or contact support.";
pub const ETA_NOT_AVAILABLE: &str = "Not available";

fn default_country() -> String {
    "US".to_string()
}

/// Postal address. Serialized with the shipping backend's field names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub name: String,
    #[serde(rename = "street1", alias = "street")]
    pub street: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "zip", alias = "zip_code", alias = "zipCode")]
    pub zip_code: String,
    #[serde(default = "default_country")]
    pub country: String,
}

/// Package dimensions in inches and weight in pounds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
}

impl Parcel {
    /// Name of the first measurement that is not a positive number.
    pub fn invalid_field(&self) -> Option<&'static str> {
        [
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
            ("weight", self.weight),
        ]
        .into_iter()
        .find(|(_, value)| !(value.is_finite() && *value > 0.0))
        .map(|(name, _)| name)
    }
}

#[derive(Serialize)]
struct ParcelPayload {
    length: String,
    width: String,
    height: String,
    distance_unit: &'static str,
    weight: String,
    mass_unit: &'static str,
}

impl From<&Parcel> for ParcelPayload {
    fn from(parcel: &Parcel) -> Self {
        Self {
            length: parcel.length.to_string(),
            width: parcel.width.to_string(),
            height: parcel.height.to_string(),
            distance_unit: "in",
            weight: parcel.weight.to_string(),
            mass_unit: "lb",
        }
    }
}

#[derive(Serialize)]
struct ShipmentRequest<'a> {
    address_from: &'a Address,
    address_to: &'a Address,
    parcels: [ParcelPayload; 1],
    #[serde(rename = "async")]
    is_async: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Amount {
    Text(String),
    Number(serde_json::Number),
}

#[derive(Deserialize)]
struct RawRate {
    provider: String,
    amount: Amount,
    #[serde(default)]
    duration_terms: Option<String>,
}

#[derive(Deserialize)]
struct ShipmentResponse {
    #[serde(default)]
    rates: Option<Vec<RawRate>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RateQuote {
    pub carrier_name: String,
    /// Decimal amount exactly as the backend reported it.
    pub amount: String,
    pub duration_terms: String,
}

impl From<RawRate> for RateQuote {
    fn from(raw: RawRate) -> Self {
        let amount = match raw.amount {
            Amount::Text(text) => text,
            Amount::Number(number) => number.to_string(),
        };
        Self {
            carrier_name: raw.provider,
            amount,
            duration_terms: raw.duration_terms.unwrap_or_default(),
        }
    }
}

impl fmt::Display for RateQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - ${} ({})", self.carrier_name, self.amount, self.duration_terms)
    }
}

/// Header line followed by one line per quote, or the "no rates" message.
pub fn format_rates(quotes: &[RateQuote]) -> String {
    if quotes.is_empty() {
        return NO_RATES_MESSAGE.to_string();
    }
    let lines: Vec<String> = quotes.iter().take(MAX_RATES).map(ToString::to_string).collect();
    format!("{RATES_HEADER}\n{}", lines.join("\n"))
}

/// User-facing text for a rate lookup. Failures are logged and collapsed to
/// one fixed message.
pub fn render_rates(outcome: &Result<Vec<RateQuote>, BackendError>) -> String {
    match outcome {
        Ok(quotes) => format_rates(quotes),
        Err(err) => {
            error!(error = %err, "shipping rates request failed");
            RATES_ERROR_MESSAGE.to_string()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Carrier {
    Usps,
    Fedex,
    Ups,
    Other(String),
}

impl Carrier {
    pub fn as_str(&self) -> &str {
        match self {
            Carrier::Usps => "usps",
            Carrier::Fedex => "fedex",
            Carrier::Ups => "ups",
            Carrier::Other(token) => token,
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Carrier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        match token.as_str() {
            "" => Err("carrier cannot be empty".to_string()),
            "usps" => Ok(Carrier::Usps),
            "fedex" => Ok(Carrier::Fedex),
            "ups" => Ok(Carrier::Ups),
            _ if token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') => {
                Ok(Carrier::Other(token))
            }
            _ => Err(format!("invalid carrier token: {s}")),
        }
    }
}

impl Serialize for Carrier {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Carrier {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Deserialize)]
struct RawLocation {
    city: Option<String>,
    country: Option<String>,
}

#[derive(Deserialize)]
struct RawTrackingStatus {
    status: Option<String>,
    location: Option<RawLocation>,
}

#[derive(Deserialize)]
struct TrackResponse {
    tracking_status: Option<RawTrackingStatus>,
    #[serde(default)]
    eta: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrackingStatus {
    pub status: String,
    pub city: String,
    pub country: String,
    pub eta: Option<String>,
}

impl TrackingStatus {
    fn from_response(raw: TrackResponse) -> Result<Self, BackendError> {
        let missing = |field: &str| BackendError::MalformedResponse(format!("missing {field}"));

        let tracking = raw.tracking_status.ok_or_else(|| missing("tracking_status"))?;
        let status = tracking.status.ok_or_else(|| missing("tracking_status.status"))?;
        let location = tracking
            .location
            .ok_or_else(|| missing("tracking_status.location"))?;
        Ok(Self {
            status,
            city: location.city.ok_or_else(|| missing("tracking_status.location.city"))?,
            country: location
                .country
                .ok_or_else(|| missing("tracking_status.location.country"))?,
            eta: raw.eta,
        })
    }
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tracking Status: {}\nCurrent Location: {}, {}\nEstimated Delivery: {}",
            self.status,
            self.city,
            self.country,
            self.eta.as_deref().unwrap_or(ETA_NOT_AVAILABLE)
        )
    }
}

/// User-facing text for a tracking lookup. A missing credential gets its own
/// message; every other failure is logged and collapsed.
pub fn render_tracking(outcome: &Result<TrackingStatus, BackendError>) -> String {
    match outcome {
        Ok(status) => status.to_string(),
        Err(err) if err.is_configuration_missing() => TRACKING_UNAVAILABLE_MESSAGE.to_string(),
        Err(err) => {
            error!(error = %err, "shipment tracking request failed");
            TRACKING_ERROR_MESSAGE.to_string()
        }
    }
}

/// Client for the shipping backend's rate and tracking endpoints.
#[derive(Clone, Debug)]
pub struct ShippingClient {
    client: reqwest::Client,
    config: ShippingConfig,
}

impl ShippingClient {
    pub fn new(client: reqwest::Client, config: ShippingConfig) -> Self {
        Self { client, config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, BackendError> {
        self.config
            .api_key
            .as_deref()
            .ok_or(BackendError::ConfigurationMissing("shipping"))
    }

    /// `<base>/<segments...>/` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.config.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidEndpoint(self.config.api_base.to_string()))?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }

    async fn read_body<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(BackendError::Status { status, body: text });
        }
        serde_json::from_str(&text).map_err(|e| BackendError::MalformedResponse(e.to_string()))
    }

    /// Up to [`MAX_RATES`] quotes in backend order.
    pub async fn quote_rates(
        &self,
        origin: &Address,
        destination: &Address,
        parcel: &Parcel,
    ) -> Result<Vec<RateQuote>, BackendError> {
        let api_key = self.api_key()?;
        let body = ShipmentRequest {
            address_from: origin,
            address_to: destination,
            parcels: [ParcelPayload::from(parcel)],
            is_async: false,
        };

        let response = self
            .client
            .post(self.endpoint(&["shipments"])?)
            .header(reqwest::header::AUTHORIZATION, format!("ShippoToken {api_key}"))
            .json(&body)
            .send()
            .await?;

        let parsed: ShipmentResponse = Self::read_body(response).await?;
        let quotes: Vec<RateQuote> = parsed
            .rates
            .unwrap_or_default()
            .into_iter()
            .take(MAX_RATES)
            .map(RateQuote::from)
            .collect();
        info!(count = quotes.len(), "received shipping rates");
        Ok(quotes)
    }

    pub async fn get_rates(&self, origin: &Address, destination: &Address, parcel: &Parcel) -> String {
        render_rates(&self.quote_rates(origin, destination, parcel).await)
    }

    pub async fn track(
        &self,
        tracking_number: &str,
        carrier: &Carrier,
    ) -> Result<TrackingStatus, BackendError> {
        let api_key = self.api_key()?;
        let url = self.endpoint(&["tracks", carrier.as_str(), tracking_number])?;

        let response = self
            .client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, format!("ShippoToken {api_key}"))
            .send()
            .await?;

        let parsed: TrackResponse = Self::read_body(response).await?;
        TrackingStatus::from_response(parsed)
    }

    pub async fn track_shipment(&self, tracking_number: &str, carrier: &Carrier) -> String {
        render_tracking(&self.track(tracking_number, carrier).await)
    }
}
