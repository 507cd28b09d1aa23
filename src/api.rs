//! HTTP plumbing for the enumeration endpoints and the prediction endpoint.
//!
//! The HTTP status is not inspected. The backend answers 400/500
//! with a JSON `{"error": ...}` body, which is decoded like any other reply.

use crate::config::PREDICT_ENDPOINT;
use crate::OptionEntry;
use gloo_net::http::Request;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Errors raised while talking to the backend.
#[derive(Debug)]
pub enum ApiError {
    /// The request could not be built or the fetch itself failed.
    Network(String),
    /// The body was not the JSON shape we expected.
    Decode(String),
    /// The request body could not be serialized.
    Encode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Decode(msg) => write!(f, "Malformed response: {}", msg),
            ApiError::Encode(msg) => write!(f, "Could not encode request: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Encode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// Body of `POST /predict`.
#[derive(Debug, Serialize)]
pub struct PredictionRequest {
    pub features: [f64; 3],
}

/// Prediction value; the model service replies with a one-element list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PredictionValue {
    Scalar(f64),
    Batch(Vec<f64>),
}

impl PredictionValue {
    /// The single predicted figure, if there is exactly one finite value.
    pub fn value(&self) -> Option<f64> {
        let v = match self {
            PredictionValue::Scalar(v) => *v,
            PredictionValue::Batch(values) => match values.as_slice() {
                [v] => *v,
                _ => return None,
            },
        };
        v.is_finite().then_some(v)
    }
}

/// Body returned by `POST /predict`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub prediction: Option<PredictionValue>,
    #[serde(default)]
    pub error: Option<Value>,
}

/// What a decoded prediction reply means for the user.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Estimate(f64),
    BackendError(String),
    /// Neither a usable prediction nor an error message was present.
    Unusable,
}

impl PredictionResponse {
    pub fn outcome(&self) -> PredictionOutcome {
        if let Some(value) = self.prediction.as_ref().and_then(PredictionValue::value) {
            return PredictionOutcome::Estimate(value);
        }
        // falsy error values (null, false, "", 0) carry no message
        match &self.error {
            None | Some(Value::Null) | Some(Value::Bool(false)) => PredictionOutcome::Unusable,
            Some(Value::String(msg)) if msg.is_empty() => PredictionOutcome::Unusable,
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => PredictionOutcome::Unusable,
            Some(Value::String(msg)) => PredictionOutcome::BackendError(msg.clone()),
            Some(other) => PredictionOutcome::BackendError(other.to_string()),
        }
    }
}

/// Decode a `label -> id` JSON object, keeping the server's key order.
pub fn parse_option_mapping(body: &str) -> Result<Vec<OptionEntry>, ApiError> {
    let parsed: Value = serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    let Value::Object(map) = parsed else {
        return Err(ApiError::Decode(
            "expected a JSON object of label to id".to_string(),
        ));
    };

    Ok(map
        .into_iter()
        .map(|(label, id)| {
            let id = match id {
                Value::String(s) => s,
                other => other.to_string(),
            };
            OptionEntry { label, id }
        })
        .collect())
}

pub fn parse_prediction_response(body: &str) -> Result<PredictionResponse, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Fetch the options served by one of the enumeration endpoints.
pub async fn fetch_options(endpoint: &str) -> Result<Vec<OptionEntry>, ApiError> {
    let body = Request::get(endpoint).send().await?.text().await?;
    let entries = parse_option_mapping(&body)?;
    info!("Loaded {} options from {}", entries.len(), endpoint);
    Ok(entries)
}

/// Options to show for `endpoint`; a failed load is logged and leaves the
/// dropdown with only its placeholder.
pub fn options_or_empty(
    endpoint: &str,
    loaded: Result<Vec<OptionEntry>, ApiError>,
) -> Vec<OptionEntry> {
    loaded.unwrap_or_else(|e| {
        error!("Error loading {}: {}", endpoint, e);
        Vec::new()
    })
}

/// Ask the backend for a salary prediction.
pub async fn request_prediction(features: [f64; 3]) -> Result<PredictionResponse, ApiError> {
    debug!("Requesting prediction for {:?}", features);
    let body = Request::post(PREDICT_ENDPOINT)
        .json(&PredictionRequest { features })?
        .send()
        .await?
        .text()
        .await?;
    parse_prediction_response(&body)
}
