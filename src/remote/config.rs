//! Configuration for the remote event service.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::comcat::RemoteFetchError;

/// Event detail service endpoint and request timeout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// FDSN event query endpoint.
    pub base_url: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://earthquake.usgs.gov/fdsnws/event/1/query".to_string(),
            timeout_secs: 30,
        }
    }
}

impl RemoteConfig {
    /// Detail URL for one event in GeoJSON, with the query form-encoded.
    pub fn event_url(&self, event_id: &str) -> Result<Url, RemoteFetchError> {
        Url::parse_with_params(&self.base_url, &[("eventid", event_id), ("format", "geojson")])
            .map_err(|e| RemoteFetchError::InvalidUrl(format!("{}: {}", self.base_url, e)))
    }
}
