//! Event lookup against an FDSN event service returning GeoJSON detail.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::tensor::{MomentTensor, TensorComponents};

use super::config::RemoteConfig;

#[derive(Debug, Error)]
pub enum RemoteFetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("malformed event document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("event document is missing '{0}'")]
    MissingField(String),
    #[error("invalid service URL {0}")]
    InvalidUrl(String),
}

/// Location and preferred moment tensor of a catalog event.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteEvent {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    pub depth: f64,
    /// `None` when the event has no moment-tensor product.
    pub tensor: Option<MomentTensor>,
}

/// Blocking client for event detail documents. No retries are attempted.
pub struct ComcatClient {
    client: reqwest::blocking::Client,
    config: RemoteConfig,
}

impl ComcatClient {
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteFetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Fetches an event and its preferred moment tensor.
    pub fn fetch_event(&self, event_id: &str) -> Result<RemoteEvent, RemoteFetchError> {
        let url = self.config.event_url(event_id)?;
        info!(event_id, url = %url, "fetching event detail");
        let response = self.client.get(url.clone()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteFetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text()?;
        parse_event_detail(event_id, &body)
    }
}

/// Parses a GeoJSON event detail document.
pub fn parse_event_detail(event_id: &str, body: &str) -> Result<RemoteEvent, RemoteFetchError> {
    let doc: Value = serde_json::from_str(body)?;
    let coords = doc
        .pointer("/geometry/coordinates")
        .and_then(Value::as_array)
        .ok_or_else(|| RemoteFetchError::MissingField("geometry.coordinates".to_string()))?;
    let coord = |i: usize| {
        coords
            .get(i)
            .and_then(number)
            .ok_or_else(|| RemoteFetchError::MissingField(format!("geometry.coordinates[{}]", i)))
    };
    let (lon, lat, depth) = (coord(0)?, coord(1)?, coord(2)?);

    let tensor = match doc
        .pointer("/properties/products/moment-tensor/0/properties")
        .and_then(Value::as_object)
    {
        Some(props) => Some(tensor_from_properties(props)?),
        None => {
            debug!(event_id, "event has no moment tensor product");
            None
        }
    };

    Ok(RemoteEvent {
        id: event_id.to_string(),
        lat,
        lon,
        depth,
        tensor,
    })
}

fn tensor_from_properties(props: &serde_json::Map<String, Value>) -> Result<MomentTensor, RemoteFetchError> {
    let component = |key: &str| {
        props
            .get(key)
            .and_then(number)
            .ok_or_else(|| RemoteFetchError::MissingField(format!("moment-tensor.{}", key)))
    };
    let components = TensorComponents::new(
        component("tensor-mrr")?,
        component("tensor-mtt")?,
        component("tensor-mpp")?,
        component("tensor-mrt")?,
        component("tensor-mrp")?,
        component("tensor-mtp")?,
    );

    let text = |key: &str| props.get(key).and_then(Value::as_str);
    let kind = text("derived-magnitude-type")
        .or_else(|| text("beachball-type"))
        .map(|t| t.rsplit('/').next().unwrap_or(t))
        .unwrap_or("unknown");
    let source = format!(
        "{}_{}",
        text("eventsource").unwrap_or("unknown"),
        text("eventsourcecode").unwrap_or("unknown")
    );

    Ok(MomentTensor::from_components(components).with_provenance(source, kind))
}

/// Product properties are strings; coordinates are numbers.
fn number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
